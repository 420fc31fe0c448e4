//! Search, table and storage configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default debounce interval for search input, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Default number of autocomplete suggestions.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 8;

/// Width given to columns that do not declare one, in pixels.
pub const DEFAULT_COLUMN_WIDTH: u32 = 150;

/// Floor for every column width, in pixels.
pub const MIN_COLUMN_WIDTH: u32 = 110;

/// Search box settings.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use stampcard_lib::config::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_debounce(Duration::from_millis(50))
///     .with_max_suggestions(5);
/// assert_eq!(config.debounce(), Duration::from_millis(50));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before the query applies.
    ///
    /// Default: 200 ms
    pub debounce_ms: u64,

    /// Maximum number of suggestions shown.
    ///
    /// Default: 8
    pub max_suggestions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

impl SearchConfig {
    /// Debounce interval as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Sets the debounce interval.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce_ms = debounce.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    /// Sets the suggestion limit.
    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }
}

/// Table layout settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Width for columns without an explicit width.
    ///
    /// Default: 150 px
    pub default_column_width: u32,

    /// Message shown when the table has no rows.
    pub empty_message: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_column_width: DEFAULT_COLUMN_WIDTH,
            empty_message: "No results".to_string(),
        }
    }
}

impl TableConfig {
    /// Sets the default column width (never below [`MIN_COLUMN_WIDTH`]).
    pub fn with_default_column_width(mut self, width: u32) -> Self {
        self.default_column_width = width.max(MIN_COLUMN_WIDTH);
        self
    }

    /// Sets the empty-state message.
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }
}

/// Where persisted table state lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the SQLite database. `None` uses the platform data directory.
    pub path: Option<PathBuf>,
}

/// Top-level configuration, persisted as `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StampcardConfig {
    pub search: SearchConfig,
    pub table: TableConfig,
    pub storage: StorageConfig,
}

impl StampcardConfig {
    /// Returns the config file path within the given config directory.
    pub fn path(config_dir: &Path) -> PathBuf {
        config_dir.join("config.toml")
    }

    /// Loads config from a TOML file. Returns the default config if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses config from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Saves config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = StampcardConfig::parse("[search]\nmax_suggestions = 3\n").unwrap();
        assert_eq!(config.search.max_suggestions, 3);
        assert_eq!(config.search.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert_eq!(config.table.default_column_width, DEFAULT_COLUMN_WIDTH);
        assert_eq!(config.storage.path, None);
    }

    #[test]
    fn default_width_is_clamped() {
        let config = TableConfig::default().with_default_column_width(20);
        assert_eq!(config.default_column_width, MIN_COLUMN_WIDTH);
    }
}
