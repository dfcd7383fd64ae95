// Namepick Core Library
// Layout and transliteration aware name matching for user pickers

pub mod cache;
pub mod candidates;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod layout;
pub mod matcher;
pub mod pattern;
pub mod session;
pub mod translit;
pub mod viewport;

pub use cache::{CacheKey, FilterResult, ResultCache, SelectorId};
pub use candidates::{load_candidates, parse_candidates, CandidateError};
pub use config::{Config, ConfigError, PickerSettings};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use engine::FilterEngine;
pub use layout::{expand_to_all_layouts, transliterate, LayoutError, LayoutTable, LayoutVariant};
pub use matcher::{CandidateFilter, Matcher, TokenPatterns, UserId, UserRecord};
pub use pattern::{CompiledPattern, PatternCompiler, PatternError, PatternVariant, Segment};
pub use session::{PickerSession, Step};
pub use translit::{DictionaryError, TranslitDictionary};
pub use viewport::{scroll_offset_for, ViewportConfig, Window};
