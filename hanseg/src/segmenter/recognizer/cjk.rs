use crate::character::CharType;
use crate::dictionary::Dictionary;
use crate::lexeme::LexemeType;
use crate::segmenter::context::AnalyzeContext;
use crate::segmenter::recognizer::{HitArena, Recognizer, CJK_LOCK};

/// Recognizer of main-dictionary words.
///
/// Every position starts a walk, so all words beginning at each position are
/// proposed, including nested and overlapping ones.
#[derive(Default)]
pub(crate) struct CjkRecognizer {
    hits: HitArena,
}

impl Recognizer for CjkRecognizer {
    fn analyze(&mut self, ctx: &mut AnalyzeContext, dict: &Dictionary) {
        if ctx.current_char_type() == CharType::Useless {
            self.hits.clear();
        } else {
            self.hits.advance(dict.main_trie(), ctx, LexemeType::CnWord);
        }

        if ctx.is_buffer_consumed() {
            self.hits.clear();
        }

        if self.hits.is_empty() {
            ctx.unlock_buffer(CJK_LOCK);
        } else {
            ctx.lock_buffer(CJK_LOCK);
        }
    }

    fn reset(&mut self) {
        self.hits.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dictionary::DictionaryBuilder;
    use crate::lexeme::Candidate;
    use crate::segmenter::recognizer::run_alone;

    fn words(text: &str, cands: &[Candidate]) -> Vec<String> {
        let chars: Vec<_> = text.chars().collect();
        cands
            .iter()
            .map(|c| chars[c.begin..c.end()].iter().collect())
            .collect()
    }

    #[test]
    fn test_nested_words() {
        let mut builder = DictionaryBuilder::new();
        builder
            .add_main_words("中华\n中华人民共和国\n华人\n人民\n共和国\n共和\n".as_bytes())
            .unwrap();
        let dict = builder.build();

        let text = "中华人民共和国";
        let cands = run_alone(&mut CjkRecognizer::default(), &dict, text);
        assert_eq!(
            words(text, &cands),
            vec!["中华人民共和国", "中华", "华人", "人民", "共和国", "共和"]
        );
        assert!(cands.iter().all(|c| c.lex_type == LexemeType::CnWord));
    }

    #[test]
    fn test_useless_breaks_words() {
        let mut builder = DictionaryBuilder::new();
        builder.add_main_words("中华\n".as_bytes()).unwrap();
        let dict = builder.build();

        let cands = run_alone(&mut CjkRecognizer::default(), &dict, "中 华中华");
        assert_eq!(cands, vec![Candidate::new(3, 2, LexemeType::CnWord)]);
    }

    #[test]
    fn test_mixed_script_word() {
        let mut builder = DictionaryBuilder::new();
        builder.add_main_words("T恤\n".as_bytes()).unwrap();
        let dict = builder.build();

        let cands = run_alone(&mut CjkRecognizer::default(), &dict, "买Ｔ恤");
        assert_eq!(cands, vec![Candidate::new(1, 2, LexemeType::CnWord)]);
    }
}
