// Namepick Layout Table
// Per-locale physical key sequences, lower section followed by upper section

use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;

/// US QWERTY, unshifted then shifted.
const EN_LOWER: &str = "`qwertyuiop[]asdfghjkl;'zxcvbnm,.";
const EN_UPPER: &str = "~QWERTYUIOP{}ASDFGHJKL:\"ZXCVBNM<>";

/// Russian ЙЦУКЕН on the same physical keys.
const RU_LOWER: &str = "ёйцукенгшщзхъфывапролджэячсмитьбю";
const RU_UPPER: &str = "ЁЙЦУКЕНГШЩЗХЪФЫВАПРОЛДЖЭЯЧСМИТЬБЮ";

/// Built-in layouts, in the order their variants are produced.
const BUILTIN_LAYOUTS: &[(&str, &str, &str)] = &[("ru", RU_LOWER, RU_UPPER), ("en", EN_LOWER, EN_UPPER)];

/// Errors raised while assembling a layout table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout locale cannot be empty")]
    EmptyLocale,

    #[error("layout '{locale}': lower section has {lower} keys, upper section has {upper}")]
    SectionMismatch {
        locale: String,
        lower: usize,
        upper: usize,
    },

    #[error("layout '{locale}' has {found} keys, table expects {expected}")]
    KeyCountMismatch {
        locale: String,
        expected: usize,
        found: usize,
    },

    #[error("layout '{locale}' maps '{key}' to more than one key position")]
    DuplicateKey { locale: String, key: char },
}

/// The character sequence of one keyboard layout.
///
/// Position `i` is the same physical key in every layout of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMap {
    locale: String,
    keys: Vec<char>,
}

impl LayoutMap {
    fn from_sections(locale: &str, lower: &str, upper: &str) -> Self {
        Self {
            locale: locale.to_string(),
            keys: lower.chars().chain(upper.chars()).collect(),
        }
    }

    /// Locale name
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// All keys, lower section first
    pub fn keys(&self) -> &[char] {
        &self.keys
    }

    /// Number of key positions (both sections)
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Position of a character in this layout
    pub fn position_of(&self, c: char) -> Option<usize> {
        self.keys.iter().position(|&k| k == c)
    }

    /// Character on a key position
    pub fn key_at(&self, position: usize) -> Option<char> {
        self.keys.get(position).copied()
    }

    pub fn contains(&self, c: char) -> bool {
        self.keys.contains(&c)
    }
}

/// Insertion-ordered collection of layouts that share one physical key set.
#[derive(Debug, Clone, Default)]
pub struct LayoutTable {
    layouts: IndexMap<String, LayoutMap>,
}

impl LayoutTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            layouts: IndexMap::new(),
        }
    }

    /// Process-wide built-in table (`ru`, `en`)
    ///
    /// Built on first use and never mutated afterwards.
    pub fn builtin() -> Arc<LayoutTable> {
        static BUILTIN: OnceLock<Arc<LayoutTable>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                let mut table = LayoutTable::new();
                for (locale, lower, upper) in BUILTIN_LAYOUTS {
                    table.insert_unchecked(LayoutMap::from_sections(locale, lower, upper));
                }
                log::debug!(
                    "built-in layout table: {} locales, {} keys each",
                    table.len(),
                    table.key_count()
                );
                Arc::new(table)
            })
            .clone()
    }

    /// Built-in table as an owned copy, for extending with configured layouts
    pub fn builtin_owned() -> LayoutTable {
        Self::builtin().as_ref().clone()
    }

    /// Add (or replace) a layout
    ///
    /// `lower` and `upper` are the unshifted and shifted key rows. Every layout
    /// in a table must cover the same number of keys, and one layout may not
    /// place the same character on two keys.
    pub fn insert(&mut self, locale: &str, lower: &str, upper: &str) -> Result<(), LayoutError> {
        if locale.trim().is_empty() {
            return Err(LayoutError::EmptyLocale);
        }

        let lower_len = lower.chars().count();
        let upper_len = upper.chars().count();
        if lower_len != upper_len {
            return Err(LayoutError::SectionMismatch {
                locale: locale.to_string(),
                lower: lower_len,
                upper: upper_len,
            });
        }

        let map = LayoutMap::from_sections(locale, lower, upper);

        // A replaced layout does not constrain its own replacement
        let expected = self
            .layouts
            .iter()
            .find(|(name, _)| name.as_str() != locale)
            .map(|(_, existing)| existing.len());
        if let Some(expected) = expected {
            if map.len() != expected {
                return Err(LayoutError::KeyCountMismatch {
                    locale: locale.to_string(),
                    expected,
                    found: map.len(),
                });
            }
        }

        for (i, &key) in map.keys.iter().enumerate() {
            if map.keys[..i].contains(&key) {
                return Err(LayoutError::DuplicateKey {
                    locale: locale.to_string(),
                    key,
                });
            }
        }

        self.insert_unchecked(map);
        Ok(())
    }

    fn insert_unchecked(&mut self, map: LayoutMap) {
        // IndexMap::insert keeps the original slot for an existing key
        self.layouts.insert(map.locale.clone(), map);
    }

    /// Get a layout by locale
    pub fn layout(&self, locale: &str) -> Option<&LayoutMap> {
        self.layouts.get(locale)
    }

    /// Locales in table order
    pub fn locales(&self) -> impl Iterator<Item = &str> + '_ {
        self.layouts.keys().map(String::as_str)
    }

    /// Layouts in table order
    pub fn iter(&self) -> impl Iterator<Item = &LayoutMap> + '_ {
        self.layouts.values()
    }

    /// Number of locales
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Number of key positions shared by every layout
    pub fn key_count(&self) -> usize {
        self.layouts.values().next().map_or(0, LayoutMap::len)
    }

    /// Find the layout a character belongs to and its key position
    ///
    /// A character present in several layouts is read as belonging to the
    /// first one in table order.
    pub fn position_of(&self, c: char) -> Option<(&str, usize)> {
        self.layouts
            .values()
            .find_map(|map| map.position_of(c).map(|pos| (map.locale(), pos)))
    }
}
