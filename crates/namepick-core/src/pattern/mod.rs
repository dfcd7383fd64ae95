//! Token pattern compilation
//!
//! A filter token is rewritten into every keyboard layout, each rewrite is
//! split into literal runs and transliteration choices, and the result is
//! compiled into one anchored prefix matcher.

mod compiler;
mod segment;

pub use compiler::{CompiledPattern, PatternCompiler, PatternError, LITERAL_LOCALE};
pub use segment::{segment, PatternVariant, Segment};
