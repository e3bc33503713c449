//! Streaming segmenter.
mod arbitrator;
pub(crate) mod context;
mod path;
pub(crate) mod recognizer;

use crate::common::DEFAULT_BUFFER_CAPACITY;
use crate::dictionary::Dictionary;
use crate::errors::{HansegError, Result};
use crate::lexeme::Lexeme;
use crate::reader::CharRead;
use crate::segmenter::arbitrator::Arbitrator;
use crate::segmenter::context::AnalyzeContext;
use crate::segmenter::recognizer::{Recognizer, RecognizerWrapper};

/// Segmenter pulling lexemes from a character stream.
///
/// Lexemes are produced in order of their begin offsets. Outside of the alternative
/// lexemes of the fine-grained mode, they cover the stream without gaps or overlaps.
///
/// # Examples
///
/// ```
/// use hanseg::{DictionaryBuilder, LexemeType, Segmenter, StrReader};
///
/// let mut builder = DictionaryBuilder::new();
/// builder.add_quantifier_words("本\n".as_bytes()).unwrap();
/// let dict = builder.build();
///
/// let segmenter = Segmenter::new(&dict, StrReader::new("三本书"), true);
/// let lexemes: Vec<_> = segmenter.map(|l| l.unwrap()).collect();
///
/// assert_eq!(lexemes[0].text(), "三本");
/// assert_eq!(lexemes[0].lex_type(), LexemeType::Count);
/// assert_eq!(lexemes[1].text(), "书");
/// ```
pub struct Segmenter<'a, R> {
    dict: &'a Dictionary,
    input: R,
    context: AnalyzeContext,
    recognizers: Vec<RecognizerWrapper>,
    arbitrator: Arbitrator,
    smart: bool,
    skip_stop_words: bool,
    exhausted: bool,
}

impl<'a, R> Segmenter<'a, R>
where
    R: CharRead,
{
    /// Creates a new instance.
    ///
    /// # Arguments
    ///
    ///  - `dict`: Dictionary to be used.
    ///  - `input`: Source of the characters.
    ///  - `use_smart`: Produces one coarse path with numerals and quantifiers fused if
    ///    `true`. Otherwise, fine-grained lexemes overlapping the path are also produced.
    pub fn new(dict: &'a Dictionary, input: R, use_smart: bool) -> Self {
        Self {
            dict,
            input,
            context: AnalyzeContext::new(DEFAULT_BUFFER_CAPACITY),
            recognizers: RecognizerWrapper::all(),
            arbitrator: Arbitrator::default(),
            smart: use_smart,
            skip_stop_words: false,
            exhausted: false,
        }
    }

    /// Specifies the number of characters held by the sliding buffer.
    ///
    /// The default value is 4096. The buffer grows while in-progress matches keep
    /// it locked up to its edge, so the capacity does not change the output.
    /// Buffered characters are discarded, so this is meant to be called before the
    /// first pull.
    ///
    /// # Errors
    ///
    /// [`HansegError`] is returned when `capacity` is less than 2.
    pub fn buffer_capacity(mut self, capacity: usize) -> Result<Self> {
        if capacity < 2 {
            return Err(HansegError::invalid_argument(
                "capacity",
                "The buffer capacity must be at least 2.",
            ));
        }
        self.context = AnalyzeContext::new(capacity);
        self.exhausted = false;
        Ok(self)
    }

    /// Drops lexemes that are stop words.
    ///
    /// This is disabled by default since the remaining lexemes no longer cover the
    /// whole stream.
    pub const fn skip_stop_words(mut self, yes: bool) -> Self {
        self.skip_stop_words = yes;
        self
    }

    /// Checks if the smart mode is used.
    pub const fn use_smart(&self) -> bool {
        self.smart
    }

    /// Gets the reference to the dictionary.
    pub const fn dictionary(&self) -> &'a Dictionary {
        self.dict
    }

    /// Gets the next lexeme, or `None` once the stream is exhausted.
    ///
    /// # Errors
    ///
    /// [`HansegError`] is returned when reading the input fails. The segmenter must be
    /// [`reset`](Self::reset) before it is used again.
    pub fn next_lexeme(&mut self) -> Result<Option<Lexeme>> {
        loop {
            let Some(mut lexeme) = self.context.next_lexeme() else {
                if self.run_cycle()? {
                    continue;
                }
                return Ok(None);
            };
            if self.smart {
                Arbitrator::compound(&mut lexeme, self.context.results_mut());
            }
            if self.skip_stop_words && self.dict.is_stop_word_str(lexeme.text()) {
                continue;
            }
            return Ok(Some(lexeme));
        }
    }

    /// Segments one buffer cycle into the output queue.
    ///
    /// Returns `false` when the input is exhausted.
    fn run_cycle(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        let available = self.context.fill_buffer(&mut self.input)?;
        if available == 0 {
            self.context.reset();
            self.exhausted = true;
            return Ok(false);
        }

        self.context.init_cursor();
        loop {
            if self.context.is_edge_locked() {
                self.context.grow_buffer(&mut self.input)?;
            }
            for recognizer in &mut self.recognizers {
                recognizer.analyze(&mut self.context, self.dict);
            }
            if self.context.need_refill_buffer() || !self.context.move_cursor() {
                break;
            }
        }
        for recognizer in &mut self.recognizers {
            recognizer.reset();
        }

        self.arbitrator.process(&mut self.context, self.smart);
        self.context.output_to_result();
        self.context.mark_buffer_offset();
        Ok(true)
    }

    /// Rebinds the segmenter to a new input, clearing every state.
    ///
    /// Returns the previous input.
    pub fn reset(&mut self, input: R) -> R {
        self.context.reset();
        for recognizer in &mut self.recognizers {
            recognizer.reset();
        }
        self.exhausted = false;
        std::mem::replace(&mut self.input, input)
    }

    /// Unwraps the input.
    pub fn into_inner(self) -> R {
        self.input
    }
}

impl<'a, R> Iterator for Segmenter<'a, R>
where
    R: CharRead,
{
    type Item = Result<Lexeme>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_lexeme().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dictionary::DictionaryBuilder;
    use crate::lexeme::LexemeType;
    use crate::reader::StrReader;

    fn dictionary() -> Dictionary {
        let mut builder = DictionaryBuilder::new();
        builder
            .add_main_words("中华\n中华人民共和国\n人民\n共和国\n".as_bytes())
            .unwrap();
        builder.add_quantifier_words("本\n".as_bytes()).unwrap();
        builder.add_stop_words("的\n".as_bytes()).unwrap();
        builder.build()
    }

    fn run(segmenter: &mut Segmenter<StrReader>) -> Vec<(String, LexemeType, bool)> {
        let mut out = vec![];
        while let Some(l) = segmenter.next_lexeme().unwrap() {
            out.push((l.text().to_string(), l.lex_type(), l.is_alternative()));
        }
        out
    }

    #[test]
    fn test_invalid_capacity() {
        let dict = dictionary();
        let result = Segmenter::new(&dict, StrReader::new(""), true).buffer_capacity(1);
        assert!(matches!(result, Err(HansegError::InvalidArgument(_))));
    }

    #[test]
    fn test_empty_input() {
        let dict = dictionary();
        let mut segmenter = Segmenter::new(&dict, StrReader::new(""), true);
        assert!(segmenter.next_lexeme().unwrap().is_none());
        assert!(segmenter.next_lexeme().unwrap().is_none());
    }

    #[test]
    fn test_smart() {
        let dict = dictionary();
        let mut segmenter = Segmenter::new(&dict, StrReader::new("中华人民共和国的三本书"), true);
        assert_eq!(
            run(&mut segmenter),
            vec![
                ("中华人民共和国".to_string(), LexemeType::CnWord, false),
                ("的".to_string(), LexemeType::CnChar, false),
                ("三本".to_string(), LexemeType::Count, false),
                ("书".to_string(), LexemeType::CnChar, false),
            ]
        );
    }

    #[test]
    fn test_skip_stop_words() {
        let dict = dictionary();
        let mut segmenter =
            Segmenter::new(&dict, StrReader::new("人民的"), true).skip_stop_words(true);
        assert_eq!(
            run(&mut segmenter),
            vec![("人民".to_string(), LexemeType::CnWord, false)]
        );
    }

    #[test]
    fn test_reset() {
        let dict = dictionary();
        let mut segmenter = Segmenter::new(&dict, StrReader::new("人民"), false);
        assert_eq!(segmenter.next_lexeme().unwrap().unwrap().text(), "人民");
        segmenter.reset(StrReader::new("中华"));
        assert_eq!(
            run(&mut segmenter),
            vec![("中华".to_string(), LexemeType::CnWord, false)]
        );
        assert!(!segmenter.use_smart());
    }
}
