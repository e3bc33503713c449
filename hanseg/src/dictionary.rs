//! Dictionary for segmentation.
pub(crate) mod builder;
pub(crate) mod trie;

use std::io::{Read, Write};

use bincode::{Decode, Encode};
use once_cell::sync::OnceCell;

use crate::common::{self, MODEL_MAGIC};
use crate::errors::{HansegError, Result};

pub use builder::DictionaryBuilder;
pub use trie::{MatchState, NodeId, Trie, TrieBuilder};

static GLOBAL_DICTIONARY: OnceCell<Dictionary> = OnceCell::new();

/// Inner data of [`Dictionary`].
#[derive(Decode, Encode)]
struct DictionaryInner {
    main: Trie,
    quantifier: Trie,
    stop_words: Trie,
}

/// Dictionary for segmentation.
///
/// It holds three independent tries: the main word dictionary, quantifier words, and
/// stop words. A dictionary is never modified after construction, so a single instance
/// can be shared by any number of segmenters on any number of threads.
pub struct Dictionary(DictionaryInner);

impl Dictionary {
    /// Creates a new instance from tries.
    pub const fn new(main: Trie, quantifier: Trie, stop_words: Trie) -> Self {
        Self(DictionaryInner {
            main,
            quantifier,
            stop_words,
        })
    }

    /// Gets the reference to the main word trie.
    #[inline(always)]
    pub const fn main_trie(&self) -> &Trie {
        &self.0.main
    }

    /// Gets the reference to the quantifier trie.
    #[inline(always)]
    pub const fn quantifier_trie(&self) -> &Trie {
        &self.0.quantifier
    }

    /// Gets the reference to the stop-word trie.
    #[inline(always)]
    pub const fn stop_word_trie(&self) -> &Trie {
        &self.0.stop_words
    }

    /// Matches a normalized sequence against the main dictionary.
    #[inline(always)]
    pub fn query(&self, seq: &[char]) -> MatchState {
        self.0.main.query(seq)
    }

    /// Matches a normalized sequence against the quantifier dictionary.
    #[inline(always)]
    pub fn query_quantifier(&self, seq: &[char]) -> MatchState {
        self.0.quantifier.query(seq)
    }

    /// Checks if a normalized sequence is a stop word.
    #[inline(always)]
    pub fn is_stop_word(&self, seq: &[char]) -> bool {
        self.0.stop_words.contains(seq)
    }

    /// Checks if a normalized text is a stop word.
    #[inline(always)]
    pub fn is_stop_word_str(&self, text: &str) -> bool {
        self.0.stop_words.contains_str(text)
    }

    /// Exports the dictionary data.
    ///
    /// # Errors
    ///
    /// When bincode generates an error, it will be returned as is.
    pub fn write<W>(&self, mut wtr: W) -> Result<usize>
    where
        W: Write,
    {
        wtr.write_all(MODEL_MAGIC)?;
        let num_bytes =
            bincode::encode_into_std_write(&self.0, &mut wtr, common::bincode_config())?;
        Ok(MODEL_MAGIC.len() + num_bytes)
    }

    /// Creates a dictionary from a reader of data exported by [`Dictionary::write()`].
    ///
    /// # Errors
    ///
    /// [`HansegError`] is returned when the magic header does not match or the
    /// decoded tries are broken. When bincode generates an error, it will be
    /// returned as is.
    pub fn read<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut magic = [0; MODEL_MAGIC.len()];
        rdr.read_exact(&mut magic)?;
        if magic != MODEL_MAGIC {
            return Err(HansegError::invalid_format(
                "rdr",
                "The magic number of the input model mismatches.",
            ));
        }
        let inner: DictionaryInner =
            bincode::decode_from_std_read(&mut rdr, common::bincode_config())?;
        for (name, trie) in [
            ("main", &inner.main),
            ("quantifier", &inner.quantifier),
            ("stop_words", &inner.stop_words),
        ] {
            if !trie.verify() {
                return Err(HansegError::invalid_format(
                    "rdr",
                    format!("The {name} trie is broken."),
                ));
            }
        }
        tracing::debug!(
            main = inner.main.num_words(),
            quantifier = inner.quantifier.num_words(),
            stop_words = inner.stop_words.num_words(),
            "loaded compiled dictionary"
        );
        Ok(Self(inner))
    }

    /// Installs the process-wide dictionary.
    ///
    /// Only the first call installs `dict`; later calls drop their argument and return
    /// the instance that is already installed.
    pub fn init_global(dict: Self) -> &'static Self {
        let mut installed = false;
        let global = GLOBAL_DICTIONARY.get_or_init(|| {
            installed = true;
            dict
        });
        if !installed {
            tracing::debug!("global dictionary already installed");
        }
        global
    }

    /// Gets the process-wide dictionary.
    ///
    /// # Errors
    ///
    /// [`HansegError::DictionaryNotInitialized`] is returned when
    /// [`Dictionary::init_global()`] has never been called.
    pub fn global() -> Result<&'static Self> {
        GLOBAL_DICTIONARY
            .get()
            .ok_or(HansegError::DictionaryNotInitialized)
    }
}
