//! Transliteration dictionary
//!
//! Equivalences between Cyrillic letters/clusters and their Latin renderings,
//! in both directions, expanded so that indirect equivalences are captured.

mod builtin;
mod dictionary;

pub use dictionary::{DictionaryError, TranslitDictionary};
