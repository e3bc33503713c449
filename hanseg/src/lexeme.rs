//! Container of resultant lexemes.
use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

/// Type of a lexeme.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum LexemeType {
    /// A character that no recognizer consumed.
    Unknown,
    /// A run of Latin letters.
    English,
    /// A number written with arabic digits.
    Arabic,
    /// A mixed alphanumeric token such as a model number or an e-mail address.
    Letter,
    /// A word of the main dictionary.
    CnWord,
    /// A single Chinese character not covered by any word.
    CnChar,
    /// A single kana, hangul, or full-width character not covered by any word.
    OtherCjk,
    /// A Chinese numeral.
    CNum,
    /// A word of the quantifier dictionary.
    Quantifier,
    /// A numeral fused with the quantifier following it.
    Count,
}

impl LexemeType {
    /// Gets the name of the type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::English => "ENGLISH",
            Self::Arabic => "ARABIC",
            Self::Letter => "LETTER",
            Self::CnWord => "CN_WORD",
            Self::CnChar => "CN_CHAR",
            Self::OtherCjk => "OTHER_CJK",
            Self::CNum => "CNUM",
            Self::Quantifier => "QUANTIFIER",
            Self::Count => "COUNT",
        }
    }
}

impl fmt::Display for LexemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate proposed by a recognizer, positioned relative to the buffer.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) struct Candidate {
    pub begin: usize,
    pub len: usize,
    pub lex_type: LexemeType,
}

impl Candidate {
    #[inline(always)]
    pub const fn new(begin: usize, len: usize, lex_type: LexemeType) -> Self {
        Self {
            begin,
            len,
            lex_type,
        }
    }

    #[inline(always)]
    pub const fn end(&self) -> usize {
        self.begin + self.len
    }

    /// Orders by begin ascending, then by length descending.
    #[inline(always)]
    pub fn cmp_position(&self, other: &Self) -> Ordering {
        self.begin
            .cmp(&other.begin)
            .then_with(|| other.len.cmp(&self.len))
    }

    #[inline(always)]
    pub const fn crosses(&self, other: &Self) -> bool {
        self.begin < other.end() && other.begin < self.end()
    }
}

/// Resultant lexeme.
///
/// Lexemes are ordered by their begin offset ascending and, at the same offset, by
/// length descending.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Lexeme {
    begin: usize,
    len: usize,
    lex_type: LexemeType,
    text: String,
    alternative: bool,
}

impl Lexeme {
    #[inline(always)]
    pub(crate) fn new(
        begin: usize,
        len: usize,
        lex_type: LexemeType,
        text: String,
        alternative: bool,
    ) -> Self {
        Self {
            begin,
            len,
            lex_type,
            text,
            alternative,
        }
    }

    /// Gets the absolute position of the first character in the stream.
    #[inline(always)]
    pub const fn begin_offset(&self) -> usize {
        self.begin
    }

    /// Gets the absolute position next to the last character in the stream.
    #[inline(always)]
    pub const fn end_offset(&self) -> usize {
        self.begin + self.len
    }

    /// Gets the number of characters.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if the lexeme covers no characters, which never holds for output lexemes.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Gets the position range of the lexeme in characters.
    #[inline(always)]
    pub const fn range_char(&self) -> Range<usize> {
        self.begin..self.begin + self.len
    }

    /// Gets the type.
    #[inline(always)]
    pub const fn lex_type(&self) -> LexemeType {
        self.lex_type
    }

    /// Gets the normalized surface string.
    #[inline(always)]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Checks if the lexeme is an extra fine-grained candidate rather than part of the
    /// coverage path.
    #[inline(always)]
    pub const fn is_alternative(&self) -> bool {
        self.alternative
    }

    /// Appends a lexeme starting right where this one ends, changing the type.
    ///
    /// Returns `false` and leaves `self` untouched when they are not adjacent.
    pub(crate) fn append(&mut self, next: &Self, lex_type: LexemeType) -> bool {
        if self.end_offset() != next.begin {
            return false;
        }
        self.len += next.len;
        self.text.push_str(&next.text);
        self.lex_type = lex_type;
        true
    }
}

impl PartialOrd for Lexeme {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Lexeme {
    fn cmp(&self, other: &Self) -> Ordering {
        self.begin
            .cmp(&other.begin)
            .then_with(|| other.len.cmp(&self.len))
            .then_with(|| self.alternative.cmp(&other.alternative))
            .then_with(|| self.text.cmp(&other.text))
            .then_with(|| (self.lex_type as u8).cmp(&(other.lex_type as u8)))
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} : {} : {}",
            self.begin,
            self.end_offset(),
            self.text,
            self.lex_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_order() {
        let a = Candidate::new(0, 2, LexemeType::CnWord);
        let b = Candidate::new(0, 7, LexemeType::CnWord);
        let c = Candidate::new(1, 1, LexemeType::CnWord);
        assert_eq!(b.cmp_position(&a), Ordering::Less);
        assert_eq!(a.cmp_position(&c), Ordering::Less);
        assert!(a.crosses(&c));
        assert!(!Candidate::new(0, 1, LexemeType::CnWord).crosses(&c));
    }

    #[test]
    fn test_append() {
        let mut l = Lexeme::new(3, 1, LexemeType::CNum, "三".to_string(), false);
        let far = Lexeme::new(5, 1, LexemeType::Quantifier, "本".to_string(), false);
        assert!(!l.append(&far, LexemeType::Count));
        let next = Lexeme::new(4, 1, LexemeType::Quantifier, "本".to_string(), false);
        assert!(l.append(&next, LexemeType::Count));
        assert_eq!(l.range_char(), 3..5);
        assert_eq!(l.text(), "三本");
        assert_eq!(l.lex_type(), LexemeType::Count);
        assert_eq!(l.to_string(), "3-5 : 三本 : COUNT");
    }
}
