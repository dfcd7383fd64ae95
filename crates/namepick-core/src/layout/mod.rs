//! Keyboard layouts
//!
//! A layout table lists, for every locale, the characters produced by the
//! same sequence of physical keys. The transliterator uses it to reinterpret
//! text typed with the wrong layout active.

mod table;
mod transliterator;

pub use table::{LayoutError, LayoutMap, LayoutTable};
pub use transliterator::{expand_to_all_layouts, transliterate, LayoutVariant};
