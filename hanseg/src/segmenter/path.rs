use std::cmp::Ordering;

use crate::lexeme::Candidate;

/// Sorted sequence of candidates with its span and covered length.
///
/// A path is used in two ways: as a *cross path* collecting candidates that start
/// inside its span (a conflict region), and as an *option* collecting candidates that
/// do not touch its span (one non-overlapping interpretation of a region).
#[derive(Clone, Debug, Default)]
pub(crate) struct LexemePath {
    lexemes: Vec<Candidate>,
    begin: usize,
    end: usize,
    payload: usize,
}

impl LexemePath {
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.lexemes.len()
    }

    #[inline(always)]
    pub fn begin(&self) -> usize {
        self.begin
    }

    #[inline(always)]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline(always)]
    pub fn payload(&self) -> usize {
        self.payload
    }

    #[inline(always)]
    pub fn span(&self) -> usize {
        self.end - self.begin
    }

    pub fn into_candidates(self) -> Vec<Candidate> {
        self.lexemes
    }

    fn insert(&mut self, cand: Candidate) {
        let i = self
            .lexemes
            .binary_search_by(|probe| probe.cmp_position(&cand))
            .unwrap_or_else(|i| i);
        self.lexemes.insert(i, cand);
    }

    /// Checks if the candidate intersects the span of the path.
    #[inline(always)]
    pub fn check_cross(&self, cand: &Candidate) -> bool {
        (self.begin <= cand.begin && cand.begin < self.end)
            || (cand.begin <= self.begin && self.begin < cand.end())
    }

    /// Adds a candidate that crosses the span, extending the span.
    ///
    /// The payload of a cross path is its whole span.
    pub fn add_cross_candidate(&mut self, cand: Candidate) -> bool {
        if self.is_empty() {
            self.begin = cand.begin;
            self.end = cand.end();
            self.payload = cand.len;
        } else if self.check_cross(&cand) {
            self.end = self.end.max(cand.end());
            self.payload = self.span();
        } else {
            return false;
        }
        self.insert(cand);
        true
    }

    /// Adds a candidate that does not cross the span.
    pub fn add_not_cross_candidate(&mut self, cand: Candidate) -> bool {
        if self.is_empty() {
            self.begin = cand.begin;
            self.end = cand.end();
            self.payload = cand.len;
            self.insert(cand);
            return true;
        }
        if self.check_cross(&cand) {
            return false;
        }
        self.payload += cand.len;
        self.insert(cand);
        self.update_span();
        true
    }

    /// Removes the last candidate.
    pub fn remove_tail(&mut self) {
        if let Some(tail) = self.lexemes.pop() {
            if self.is_empty() {
                self.begin = 0;
                self.end = 0;
                self.payload = 0;
            } else {
                self.payload -= tail.len;
                self.update_span();
            }
        }
    }

    fn update_span(&mut self) {
        if let (Some(first), Some(last)) = (self.lexemes.first(), self.lexemes.last()) {
            self.begin = first.begin;
            self.end = last.end();
        }
    }

    /// Product of the lexeme lengths, which favors even segmentations.
    pub fn x_weight(&self) -> u128 {
        self.lexemes
            .iter()
            .fold(1u128, |acc, c| acc.saturating_mul(c.len as u128))
    }

    /// Sum of `i * length` over 1-based lexeme indices, which favors longer lexemes
    /// near the end.
    pub fn p_weight(&self) -> usize {
        self.lexemes
            .iter()
            .enumerate()
            .map(|(i, c)| (i + 1) * c.len)
            .sum()
    }

    /// Ranks two options; `Greater` means `self` is preferred.
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        self.payload()
            .cmp(&other.payload())
            .then_with(|| other.len().cmp(&self.len()))
            .then_with(|| self.span().cmp(&other.span()))
            .then_with(|| self.end.cmp(&other.end))
            .then_with(|| self.x_weight().cmp(&other.x_weight()))
            .then_with(|| self.p_weight().cmp(&other.p_weight()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::lexeme::LexemeType;

    fn cand(begin: usize, len: usize) -> Candidate {
        Candidate::new(begin, len, LexemeType::CnWord)
    }

    fn path(cands: &[Candidate]) -> LexemePath {
        let mut path = LexemePath::default();
        for &c in cands {
            assert!(path.add_not_cross_candidate(c));
        }
        path
    }

    #[test]
    fn test_cross_path() {
        let mut path = LexemePath::default();
        assert!(path.add_cross_candidate(cand(0, 2)));
        assert!(path.add_cross_candidate(cand(1, 3)));
        assert!(!path.add_cross_candidate(cand(4, 1)));
        assert_eq!((path.begin(), path.end(), path.payload()), (0, 4, 4));
    }

    #[test]
    fn test_not_cross_path() {
        let mut path = path(&[cand(0, 2), cand(2, 2)]);
        assert!(!path.add_not_cross_candidate(cand(3, 2)));
        assert!(path.add_not_cross_candidate(cand(5, 1)));
        assert_eq!((path.begin(), path.end(), path.payload()), (0, 6, 5));
        path.remove_tail();
        assert_eq!((path.begin(), path.end(), path.payload()), (0, 4, 4));
        path.remove_tail();
        path.remove_tail();
        assert!(path.is_empty());
        assert_eq!(path.payload(), 0);
    }

    #[test]
    fn test_weights() {
        let path = path(&[cand(0, 1), cand(1, 2), cand(3, 3)]);
        assert_eq!(path.x_weight(), 6);
        assert_eq!(path.p_weight(), 1 + 4 + 9);
    }

    #[test]
    fn test_rank() {
        // Covers more.
        assert_eq!(
            path(&[cand(0, 3)]).cmp_rank(&path(&[cand(0, 2)])),
            Ordering::Greater
        );
        // Fewer lexemes.
        assert_eq!(
            path(&[cand(0, 4)]).cmp_rank(&path(&[cand(0, 2), cand(2, 2)])),
            Ordering::Greater
        );
        // Even lengths.
        assert_eq!(
            path(&[cand(0, 2), cand(2, 2)]).cmp_rank(&path(&[cand(0, 3), cand(3, 1)])),
            Ordering::Greater
        );
        // Longer lexemes near the end.
        assert_eq!(
            path(&[cand(0, 1), cand(1, 2), cand(3, 3)])
                .cmp_rank(&path(&[cand(0, 3), cand(3, 2), cand(5, 1)])),
            Ordering::Greater
        );
        assert_eq!(
            path(&[cand(0, 2)]).cmp_rank(&path(&[cand(0, 2)])),
            Ordering::Equal
        );
    }
}
