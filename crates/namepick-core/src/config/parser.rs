// Namepick Config Parser - TOML with Serde
// Raw configuration tables as they appear in the file

use indexmap::IndexMap;
use serde::Deserialize;

use crate::layout::LayoutError;
use crate::translit::DictionaryError;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("Invalid transliteration: {0}")]
    Dictionary(#[from] DictionaryError),

    #[error("Value out of range: {0}")]
    OutOfRange(String),
}

/// Main configuration structure (root TOML table)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    /// Picker list and input settings
    #[serde(default)]
    pub picker: Option<PickerToml>,

    /// Extra keyboard layouts, appended after the built-in ones
    #[serde(default)]
    pub layout: Vec<LayoutToml>,

    /// Extra forward transliterations (`source = "alt1|alt2"`)
    #[serde(default)]
    pub translit: IndexMap<String, String>,
}

/// `[picker]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PickerToml {
    pub item_height: Option<usize>,
    pub visible_items: Option<usize>,
    pub overscan_items: Option<usize>,
    pub debounce_ms: Option<u64>,
}

/// `[[layout]]` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutToml {
    /// Locale name; an existing locale is replaced in place
    pub locale: String,
    /// Unshifted keys, in physical key order
    pub lower: String,
    /// Shifted keys, same order as `lower`
    pub upper: String,
}

/// Parse the raw tables from a TOML string
pub fn parse_toml(content: &str) -> Result<ConfigToml, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let raw = parse_toml("").unwrap();
        assert!(raw.picker.is_none());
        assert!(raw.layout.is_empty());
        assert!(raw.translit.is_empty());
    }

    #[test]
    fn test_parse_all_sections() {
        let raw = parse_toml(
            r#"
[picker]
item_height = 2
debounce_ms = 40

[[layout]]
locale = "xx"
lower = "ab"
upper = "AB"

[translit]
"ґ" = "g"
"ї" = "yi|i"
"#,
        )
        .unwrap();

        let picker = raw.picker.unwrap();
        assert_eq!(picker.item_height, Some(2));
        assert_eq!(picker.visible_items, None);
        assert_eq!(picker.debounce_ms, Some(40));

        assert_eq!(raw.layout[0].locale, "xx");
        let keys: Vec<&str> = raw.translit.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ґ", "ї"]);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(matches!(parse_toml("[picker]\nheight = 3\n"), Err(ConfigError::TomlParse(_))));
        assert!(matches!(parse_toml("[colors]\n"), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = parse_toml("[picker]\nitem_height = \"tall\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }
}
