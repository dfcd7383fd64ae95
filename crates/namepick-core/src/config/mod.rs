// Namepick Config
// User configuration: picker settings, extra layouts and transliterations

mod parser;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;

pub use parser::{parse_toml, ConfigError, ConfigToml, LayoutToml, PickerToml};

use crate::layout::LayoutTable;
use crate::translit::TranslitDictionary;
use crate::viewport::ViewportConfig;

/// Longest accepted debounce delay
pub const MAX_DEBOUNCE_MS: u64 = 1000;

/// Picker settings after defaults are applied
///
/// Defaults suit a terminal list, one row per candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerSettings {
    pub item_height: usize,
    pub visible_items: usize,
    pub overscan_items: usize,
    pub debounce_ms: u64,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            item_height: 1,
            visible_items: 20,
            overscan_items: 10,
            debounce_ms: 16,
        }
    }
}

/// Loaded configuration
///
/// Loaded from a TOML file (default: ~/.config/namepick/config.toml). A
/// missing file means built-in tables and default picker settings.
#[derive(Debug, Clone, Default)]
pub struct Config {
    picker: PickerSettings,
    layouts: Vec<LayoutToml>,
    translit: IndexMap<String, String>,
    source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)?;
        let mut config = Self::from_toml(&content)?;
        config.source_path = Some(path.as_ref().to_path_buf());
        log::debug!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw = parse_toml(content)?;

        let mut picker = PickerSettings::default();
        if let Some(table) = raw.picker {
            if let Some(v) = table.item_height {
                if v == 0 {
                    return Err(ConfigError::OutOfRange("item_height must be at least 1".into()));
                }
                picker.item_height = v;
            }
            if let Some(v) = table.visible_items {
                picker.visible_items = v;
            }
            if let Some(v) = table.overscan_items {
                picker.overscan_items = v;
            }
            if let Some(v) = table.debounce_ms {
                if v > MAX_DEBOUNCE_MS {
                    return Err(ConfigError::OutOfRange(format!(
                        "debounce_ms {} exceeds {}",
                        v, MAX_DEBOUNCE_MS
                    )));
                }
                picker.debounce_ms = v;
            }
        }

        Ok(Self {
            picker,
            layouts: raw.layout,
            translit: raw.translit,
            source_path: None,
        })
    }

    /// Get the default config path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("namepick").join("config.toml"))
    }

    /// Load from default location (~/.config/namepick/config.toml)
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        Ok(Self::default())
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn picker(&self) -> &PickerSettings {
        &self.picker
    }

    /// Built-in layouts plus the configured ones, validated
    pub fn layout_table(&self) -> Result<Arc<LayoutTable>, ConfigError> {
        if self.layouts.is_empty() {
            return Ok(LayoutTable::builtin());
        }

        let mut table = LayoutTable::builtin_owned();
        for layout in &self.layouts {
            table.insert(&layout.locale, &layout.lower, &layout.upper)?;
        }
        log::debug!("layout table with {} configured layouts", self.layouts.len());
        Ok(Arc::new(table))
    }

    /// Built-in transliterations plus the configured ones, expanded
    pub fn dictionary(&self) -> Result<Arc<TranslitDictionary>, ConfigError> {
        if self.translit.is_empty() {
            return Ok(TranslitDictionary::builtin());
        }

        let mut forward: Vec<(&str, &str)> = TranslitDictionary::builtin_forward().to_vec();
        forward.extend(self.translit.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        Ok(Arc::new(TranslitDictionary::build(&forward)?))
    }

    pub fn viewport(&self) -> ViewportConfig {
        ViewportConfig {
            item_height: self.picker.item_height,
            visible_items: self.picker.visible_items,
            overscan_items: self.picker.overscan_items,
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.picker.debounce_ms)
    }
}
