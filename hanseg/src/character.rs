//! Character normalization and classification.

/// Class of a normalized character.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub enum CharType {
    /// Characters that no recognizer consumes (spaces, punctuation, symbols).
    #[default]
    Useless,
    /// ASCII digits.
    Arabic,
    /// Lowercase ASCII letters.
    English,
    /// Chinese ideographs.
    Chinese,
    /// Kana, hangul and half/full-width forms.
    OtherCjk,
}

/// Chinese numeral characters, including positional units.
const CN_NUMBERS: &str = "一二两三四五六七八九十零壹贰叁肆伍陆柒捌玖拾百千万亿佰仟萬億兆卅廿";

/// Characters joining letters and digits inside a mixed alphanumeric token.
const LETTER_CONNECTORS: [char; 7] = ['#', '&', '+', '-', '.', '@', '_'];

/// Characters joining digits inside a number.
const NUM_CONNECTORS: [char; 2] = [',', '.'];

/// Normalizes a character.
///
/// The ideographic space becomes an ASCII space, full-width ASCII variants become
/// their ASCII counterparts, and uppercase letters are lowercased.
#[inline(always)]
pub fn regularize(c: char) -> char {
    match c {
        '\u{3000}' => ' ',
        '\u{FF01}'..='\u{FF5E}' => {
            let c = char::from_u32(u32::from(c) - 0xFEE0).unwrap_or(c);
            c.to_ascii_lowercase()
        }
        _ if c.is_ascii_uppercase() => c.to_ascii_lowercase(),
        _ if c.is_uppercase() => {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => l,
                _ => c,
            }
        }
        _ => c,
    }
}

/// Normalizes every character of a word.
pub fn regularize_str(word: &str) -> String {
    word.chars().map(regularize).collect()
}

/// Classifies a normalized character.
#[inline(always)]
pub fn char_type(c: char) -> CharType {
    match c {
        '0'..='9' => CharType::Arabic,
        'a'..='z' | 'A'..='Z' => CharType::English,
        // CJK Unified Ideographs, Extension A, Compatibility Ideographs
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}' => {
            CharType::Chinese
        }
        // Hiragana, Katakana, Katakana Phonetic Extensions
        '\u{3040}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' => CharType::OtherCjk,
        // Hangul Jamo, Hangul Compatibility Jamo, Hangul Syllables
        '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}' | '\u{AC00}'..='\u{D7AF}' => {
            CharType::OtherCjk
        }
        // Halfwidth and Fullwidth Forms
        '\u{FF00}'..='\u{FFEF}' => CharType::OtherCjk,
        _ => CharType::Useless,
    }
}

/// Checks if the character is a Chinese numeral.
#[inline(always)]
pub fn is_cn_number(c: char) -> bool {
    CN_NUMBERS.contains(c)
}

/// Checks if the character may join letters and digits.
#[inline(always)]
pub fn is_letter_connector(c: char) -> bool {
    LETTER_CONNECTORS.contains(&c)
}

/// Checks if the character may join digits.
#[inline(always)]
pub fn is_num_connector(c: char) -> bool {
    NUM_CONNECTORS.contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regularize() {
        assert_eq!(regularize('\u{3000}'), ' ');
        assert_eq!(regularize('Ａ'), 'a');
        assert_eq!(regularize('１'), '1');
        assert_eq!(regularize('＠'), '@');
        assert_eq!(regularize('Q'), 'q');
        assert_eq!(regularize('中'), '中');
        assert_eq!(regularize_str("ＩＫ分词"), "ik分词");
    }

    #[test]
    fn test_char_type() {
        assert_eq!(char_type('7'), CharType::Arabic);
        assert_eq!(char_type('x'), CharType::English);
        assert_eq!(char_type('中'), CharType::Chinese);
        assert_eq!(char_type('㐀'), CharType::Chinese);
        assert_eq!(char_type('あ'), CharType::OtherCjk);
        assert_eq!(char_type('한'), CharType::OtherCjk);
        assert_eq!(char_type('，'), CharType::OtherCjk);
        assert_eq!(char_type(','), CharType::Useless);
        assert_eq!(char_type(' '), CharType::Useless);
    }

    #[test]
    fn test_connectors() {
        assert!(is_cn_number('万'));
        assert!(!is_cn_number('本'));
        assert!(is_letter_connector('@'));
        assert!(!is_letter_connector(','));
        assert!(is_num_connector(','));
    }
}
