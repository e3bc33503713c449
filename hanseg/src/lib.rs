//! # Hanseg
//!
//! Hanseg is a dictionary-driven streaming segmenter for Chinese text mixed with
//! Latin words and numbers.
//!
//! A [`Segmenter`] pulls characters from a [`CharRead`] source through a sliding
//! buffer, proposes candidate lexemes with dictionary, numeral and letter
//! recognizers, and resolves overlapping candidates into one path.
//!
//! ```
//! use hanseg::{DictionaryBuilder, Segmenter, StrReader};
//!
//! let mut builder = DictionaryBuilder::new();
//! builder
//!     .add_main_words("中华\n中华人民共和国\n人民\n".as_bytes())
//!     .unwrap();
//! let dict = builder.build();
//!
//! let segmenter = Segmenter::new(&dict, StrReader::new("中华人民共和国成立"), true);
//! let words: Vec<_> = segmenter
//!     .map(|l| l.unwrap().text().to_string())
//!     .collect();
//! assert_eq!(words, ["中华人民共和国", "成", "立"]);
//! ```
#![deny(missing_docs)]

pub mod character;
pub mod common;
pub mod dictionary;
pub mod errors;
pub mod lexeme;
pub mod reader;
pub mod segmenter;


pub use dictionary::{Dictionary, DictionaryBuilder};
pub use errors::HansegError;
pub use lexeme::{Lexeme, LexemeType};
pub use reader::{CharRead, StrReader, Utf8Reader};
pub use segmenter::Segmenter;
