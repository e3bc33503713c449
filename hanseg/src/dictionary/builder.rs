use std::collections::BTreeSet;
use std::io::{prelude::*, BufReader, Read};

use crate::character::regularize_str;
use crate::dictionary::{Dictionary, Trie};
use crate::errors::{HansegError, Result};

/// Builder of [`Dictionary`] from plain word lists.
///
/// Every list has one entry per line. Blank lines and lines starting with `#` are
/// skipped, a leading byte order mark is removed, and entries are trimmed and
/// normalized in the same way as segmented text. Lists may be added repeatedly to
/// layer extension dictionaries on top of the base ones.
#[derive(Default)]
pub struct DictionaryBuilder {
    main: BTreeSet<String>,
    disabled: BTreeSet<String>,
    quantifier: BTreeSet<String>,
    stop_words: BTreeSet<String>,
}

impl DictionaryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds words of the main dictionary from a reader.
    ///
    /// # Errors
    ///
    /// [`HansegError`] is returned when the input is not valid UTF-8 or cannot be read.
    pub fn add_main_words<R>(&mut self, rdr: R) -> Result<&mut Self>
    where
        R: Read,
    {
        Self::read_words(rdr, "main", &mut self.main)?;
        Ok(self)
    }

    /// Adds quantifier words from a reader.
    ///
    /// # Errors
    ///
    /// [`HansegError`] is returned when the input is not valid UTF-8 or cannot be read.
    pub fn add_quantifier_words<R>(&mut self, rdr: R) -> Result<&mut Self>
    where
        R: Read,
    {
        Self::read_words(rdr, "quantifier", &mut self.quantifier)?;
        Ok(self)
    }

    /// Adds stop words from a reader.
    ///
    /// # Errors
    ///
    /// [`HansegError`] is returned when the input is not valid UTF-8 or cannot be read.
    pub fn add_stop_words<R>(&mut self, rdr: R) -> Result<&mut Self>
    where
        R: Read,
    {
        Self::read_words(rdr, "stop_words", &mut self.stop_words)?;
        Ok(self)
    }

    /// Removes the words listed in a reader from the main dictionary.
    ///
    /// # Errors
    ///
    /// [`HansegError`] is returned when the input is not valid UTF-8 or cannot be read.
    pub fn disable_words<R>(&mut self, rdr: R) -> Result<&mut Self>
    where
        R: Read,
    {
        Self::read_words(rdr, "disabled", &mut self.disabled)?;
        Ok(self)
    }

    /// Adds a single word to the main dictionary.
    pub fn add_word<S>(&mut self, word: S) -> &mut Self
    where
        S: AsRef<str>,
    {
        if let Some(w) = Self::normalize(word.as_ref()) {
            self.main.insert(w);
        }
        self
    }

    /// Removes a word from the main dictionary.
    ///
    /// A disabled word stays disabled even if it is added again later.
    pub fn disable_word<S>(&mut self, word: S) -> &mut Self
    where
        S: AsRef<str>,
    {
        if let Some(w) = Self::normalize(word.as_ref()) {
            self.disabled.insert(w);
        }
        self
    }

    /// Builds the dictionary.
    pub fn build(&self) -> Dictionary {
        let main = Trie::from_words(self.main.difference(&self.disabled));
        let quantifier = Trie::from_words(&self.quantifier);
        let stop_words = Trie::from_words(&self.stop_words);
        tracing::debug!(
            main = main.num_words(),
            disabled = self.disabled.len(),
            quantifier = quantifier.num_words(),
            stop_words = stop_words.num_words(),
            "built dictionary"
        );
        Dictionary::new(main, quantifier, stop_words)
    }

    fn normalize(line: &str) -> Option<String> {
        let line = line.trim_start_matches('\u{FEFF}').trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        Some(regularize_str(line))
    }

    fn read_words<R>(rdr: R, name: &'static str, words: &mut BTreeSet<String>) -> Result<()>
    where
        R: Read,
    {
        let reader = BufReader::new(rdr);
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                if e.kind() == std::io::ErrorKind::InvalidData {
                    HansegError::invalid_format(name, format!("line {} is not UTF-8", i + 1))
                } else {
                    HansegError::StdIo(e)
                }
            })?;
            if let Some(w) = Self::normalize(&line) {
                words.insert(w);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dictionary::MatchState;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_build() {
        let main = "\u{FEFF}中华\n# comment\n\n  人民 \nＩＫ分词\n";
        let quantifier = "本\n个\n";
        let stop_words = "的\nand\n";

        let dict = DictionaryBuilder::new()
            .add_main_words(main.as_bytes())
            .unwrap()
            .add_quantifier_words(quantifier.as_bytes())
            .unwrap()
            .add_stop_words(stop_words.as_bytes())
            .unwrap()
            .build();

        assert_eq!(dict.main_trie().num_words(), 3);
        assert_eq!(dict.query(&chars("中华")), MatchState::ExactOnly);
        assert_eq!(dict.query(&chars("人民")), MatchState::ExactOnly);
        assert_eq!(dict.query(&chars("ik分词")), MatchState::ExactOnly);
        assert_eq!(dict.query(&chars("# comment")), MatchState::NoMatch);
        assert_eq!(dict.query_quantifier(&chars("本")), MatchState::ExactOnly);
        assert!(dict.is_stop_word(&chars("and")));
    }

    #[test]
    fn test_extension_and_disable() {
        let mut builder = DictionaryBuilder::new();
        builder
            .add_main_words("中华\n人民\n".as_bytes())
            .unwrap()
            .add_main_words("共和国\n".as_bytes())
            .unwrap();
        builder.disable_word("人民").add_word("人民").add_word("中国");
        builder.disable_words("共和国\n".as_bytes()).unwrap();
        let dict = builder.build();

        assert!(dict.main_trie().contains(&chars("中华")));
        assert!(dict.main_trie().contains(&chars("中国")));
        assert!(!dict.main_trie().contains(&chars("人民")));
        assert!(!dict.main_trie().contains(&chars("共和国")));
        assert_eq!(dict.main_trie().num_words(), 2);
    }

    #[test]
    fn test_invalid_utf8() {
        let data: &[u8] = &[0xe4, 0xb8, 0xad, b'\n', 0xff, 0xfe, b'\n'];
        let result = DictionaryBuilder::new().add_main_words(data).map(|_| ());
        assert!(matches!(result, Err(HansegError::InvalidFormat(_))));
    }
}
