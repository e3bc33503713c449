use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::lexeme::{Candidate, Lexeme, LexemeType};
use crate::segmenter::context::{AnalyzeContext, ResolvedRegion};
use crate::segmenter::path::LexemePath;

/// Resolver of overlapping candidates.
#[derive(Default)]
pub(crate) struct Arbitrator {
    conflicts: Vec<usize>,
}

impl Arbitrator {
    /// Groups the candidates of the cycle into conflict regions and resolves each one.
    pub fn process(&mut self, ctx: &mut AnalyzeContext, smart: bool) {
        let cands = ctx.take_candidates();

        let mut start = 0;
        let mut cross = LexemePath::default();
        for (i, &cand) in cands.iter().enumerate() {
            if !cross.add_cross_candidate(cand) {
                let region = self.resolve(&cands[start..i], cross.begin(), cross.end(), smart);
                ctx.add_resolved_region(region);
                cross = LexemePath::default();
                cross.add_cross_candidate(cand);
                start = i;
            }
        }
        if !cross.is_empty() {
            let region = self.resolve(&cands[start..], cross.begin(), cross.end(), smart);
            ctx.add_resolved_region(region);
        }
    }

    fn resolve(
        &mut self,
        region: &[Candidate],
        begin: usize,
        end: usize,
        smart: bool,
    ) -> ResolvedRegion {
        if region.len() == 1 {
            return ResolvedRegion {
                begin,
                end,
                primary: region.to_vec(),
                alternatives: vec![],
            };
        }

        let mut primary = self.judge(region).into_candidates();
        let mut alternatives = vec![];
        if !smart {
            for cand in region {
                match primary.binary_search_by(|probe| probe.cmp_position(cand)) {
                    Ok(_) => {}
                    Err(i) => {
                        if primary.iter().any(|p| p.crosses(cand)) {
                            alternatives.push(*cand);
                        } else {
                            primary.insert(i, *cand);
                        }
                    }
                }
            }
        }
        ResolvedRegion {
            begin,
            end,
            primary,
            alternatives,
        }
    }

    /// Searches the best non-overlapping option of a conflict region.
    ///
    /// A forward pass builds the first option and stacks the candidates it rejects.
    /// Each stacked candidate then gets its turn: the option is rolled back until the
    /// candidate fits and is rebuilt forward from it.
    fn judge(&mut self, region: &[Candidate]) -> LexemePath {
        let mut option = LexemePath::default();
        self.conflicts.clear();
        Self::forward_path(region, 0, &mut option, Some(&mut self.conflicts));

        let mut best = option.clone();
        while let Some(i) = self.conflicts.pop() {
            Self::back_path(&region[i], &mut option);
            Self::forward_path(region, i, &mut option, None);
            if option.cmp_rank(&best) == Ordering::Greater {
                best = option.clone();
            }
        }
        best
    }

    fn forward_path(
        region: &[Candidate],
        from: usize,
        option: &mut LexemePath,
        mut conflicts: Option<&mut Vec<usize>>,
    ) {
        for (i, &cand) in region.iter().enumerate().skip(from) {
            if !option.add_not_cross_candidate(cand) {
                if let Some(conflicts) = conflicts.as_mut() {
                    conflicts.push(i);
                }
            }
        }
    }

    fn back_path(cand: &Candidate, option: &mut LexemePath) {
        while !option.is_empty() && option.check_cross(cand) {
            option.remove_tail();
        }
    }

    /// Fuses a lexeme with the numeral or quantifier lexemes queued right after it.
    ///
    /// An arabic number followed by a Chinese numeral becomes a numeral, and an arabic
    /// number or a numeral followed by a quantifier becomes a count.
    pub fn compound(result: &mut Lexeme, queue: &mut VecDeque<Lexeme>) {
        if result.lex_type() == LexemeType::Arabic {
            if let Some(next) = queue.front() {
                let fused = match next.lex_type() {
                    LexemeType::CNum => result.append(next, LexemeType::CNum),
                    LexemeType::Quantifier => result.append(next, LexemeType::Count),
                    _ => false,
                };
                if fused {
                    queue.pop_front();
                }
            }
        }
        if result.lex_type() == LexemeType::CNum {
            if let Some(next) = queue.front() {
                if next.lex_type() == LexemeType::Quantifier
                    && result.append(next, LexemeType::Count)
                {
                    queue.pop_front();
                }
            }
        }
    }
}
