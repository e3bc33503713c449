use crate::character::{self, CharType};
use crate::dictionary::Dictionary;
use crate::lexeme::{Candidate, LexemeType};
use crate::segmenter::context::AnalyzeContext;
use crate::segmenter::recognizer::{HitArena, Recognizer, QUANTIFIER_LOCK};

/// Character sequence that may continue a numeral if another numeral follows.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Connector {
    None,
    // 分 of 分之
    Fen,
    // 分之
    FenZhi,
    // decimal point 点
    Dian,
}

#[derive(Clone, Copy, Debug)]
struct NumeralRun {
    begin: usize,
    end: usize,
    connector: Connector,
}

/// Recognizer of Chinese numerals and of the quantifier words following them.
#[derive(Default)]
pub(crate) struct QuantifierRecognizer {
    numeral: Option<NumeralRun>,
    hits: HitArena,
}

impl QuantifierRecognizer {
    fn process_numeral(&mut self, ctx: &mut AnalyzeContext) {
        let c = ctx.current_char();
        let cursor = ctx.cursor();

        if let Some(run) = self.numeral.as_mut() {
            let extended = match (run.connector, c) {
                (Connector::None, '分') => {
                    run.connector = Connector::Fen;
                    true
                }
                (Connector::Fen, '之') => {
                    run.connector = Connector::FenZhi;
                    true
                }
                (Connector::None, '点') => {
                    run.connector = Connector::Dian;
                    true
                }
                (Connector::None | Connector::FenZhi | Connector::Dian, c)
                    if character::is_cn_number(c) =>
                {
                    run.end = cursor + 1;
                    run.connector = Connector::None;
                    true
                }
                _ => false,
            };
            if !extended {
                self.output_numeral(ctx);
            }
        }

        if self.numeral.is_none() && character::is_cn_number(c) {
            self.numeral = Some(NumeralRun {
                begin: cursor,
                end: cursor + 1,
                connector: Connector::None,
            });
        }

        if ctx.is_buffer_consumed() {
            self.output_numeral(ctx);
        }
    }

    fn output_numeral(&mut self, ctx: &mut AnalyzeContext) {
        if let Some(run) = self.numeral.take() {
            ctx.add_candidate(Candidate::new(
                run.begin,
                run.end - run.begin,
                LexemeType::CNum,
            ));
        }
    }

    /// Quantifiers are only looked for where a count is plausible: inside or right
    /// after a numeral, or while a quantifier match is in progress.
    fn need_count_scan(&self, ctx: &AnalyzeContext) -> bool {
        self.numeral.is_some() || !self.hits.is_empty() || ctx.is_numeral_adjacent()
    }

    fn process_count(&mut self, ctx: &mut AnalyzeContext, dict: &Dictionary) {
        if !self.need_count_scan(ctx) {
            return;
        }
        if ctx.current_char_type() == CharType::Chinese {
            self.hits
                .advance(dict.quantifier_trie(), ctx, LexemeType::Quantifier);
        } else {
            self.hits.clear();
        }
        if ctx.is_buffer_consumed() {
            self.hits.clear();
        }
    }
}

impl Recognizer for QuantifierRecognizer {
    fn analyze(&mut self, ctx: &mut AnalyzeContext, dict: &Dictionary) {
        self.process_numeral(ctx);
        self.process_count(ctx, dict);

        if self.numeral.is_none() && self.hits.is_empty() {
            ctx.unlock_buffer(QUANTIFIER_LOCK);
        } else {
            ctx.lock_buffer(QUANTIFIER_LOCK);
        }
    }

    fn reset(&mut self) {
        self.numeral = None;
        self.hits.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dictionary::DictionaryBuilder;
    use crate::segmenter::recognizer::run_alone;

    fn dictionary() -> Dictionary {
        let mut builder = DictionaryBuilder::new();
        builder
            .add_quantifier_words("本\n分\n分钟\n点\n个\n".as_bytes())
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_numeral_and_quantifier() {
        let dict = dictionary();
        let cands = run_alone(&mut QuantifierRecognizer::default(), &dict, "三本书");
        assert_eq!(
            cands,
            vec![
                Candidate::new(0, 1, LexemeType::CNum),
                Candidate::new(1, 1, LexemeType::Quantifier),
            ]
        );
    }

    #[test]
    fn test_quantifier_needs_numeral() {
        let dict = dictionary();
        let cands = run_alone(&mut QuantifierRecognizer::default(), &dict, "这本书");
        assert!(cands.is_empty());
    }

    #[test]
    fn test_positional_units() {
        let dict = dictionary();
        let cands = run_alone(&mut QuantifierRecognizer::default(), &dict, "一百二十三万个");
        assert_eq!(
            cands,
            vec![
                Candidate::new(0, 6, LexemeType::CNum),
                Candidate::new(6, 1, LexemeType::Quantifier),
            ]
        );
    }

    #[test]
    fn test_fraction() {
        let dict = dictionary();
        let cands = run_alone(&mut QuantifierRecognizer::default(), &dict, "三分之一");
        assert_eq!(
            cands,
            vec![
                Candidate::new(0, 4, LexemeType::CNum),
                Candidate::new(1, 1, LexemeType::Quantifier),
            ]
        );
    }

    #[test]
    fn test_decimal() {
        let dict = dictionary();
        let cands = run_alone(&mut QuantifierRecognizer::default(), &dict, "三点五");
        assert_eq!(
            cands,
            vec![
                Candidate::new(0, 3, LexemeType::CNum),
                Candidate::new(1, 1, LexemeType::Quantifier),
            ]
        );
    }

    #[test]
    fn test_dangling_connector() {
        let dict = dictionary();
        let cands = run_alone(&mut QuantifierRecognizer::default(), &dict, "三分钟");
        assert_eq!(
            cands,
            vec![
                Candidate::new(0, 1, LexemeType::CNum),
                Candidate::new(1, 2, LexemeType::Quantifier),
                Candidate::new(1, 1, LexemeType::Quantifier),
            ]
        );

        let cands = run_alone(&mut QuantifierRecognizer::default(), &dict, "十二点");
        assert_eq!(
            cands,
            vec![
                Candidate::new(0, 2, LexemeType::CNum),
                Candidate::new(2, 1, LexemeType::Quantifier),
            ]
        );
    }
}
