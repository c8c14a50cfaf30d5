//! Configuration file loading
//!
//! The config is read once at startup and never written back.

use crate::constants::{
    APP_NAME, DEFAULT_REPEAT_INTERVAL_MS, MAX_REPEAT_INTERVAL_MS, MIN_REPEAT_INTERVAL_MS,
};
use crate::layout::{LayoutTable, Row};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layout shown at startup; the first layout when unset
    pub language: Option<String>,
    pub repeat_interval_ms: Option<u64>,
    /// Custom layouts replacing the built-in ones, in cycling order
    pub layouts: Vec<LayoutConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub language: String,
    pub rows: Vec<Row>,
}

impl Config {
    /// Load `config.json` from the user's config directory.
    ///
    /// A missing file or directory gives the defaults, as does a file that
    /// fails to parse (with a warning).
    pub fn load_default() -> Result<Config> {
        let Some(path) = default_path() else {
            tracing::debug!("No config directory available, using defaults");
            return Ok(Config::default());
        };

        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse config file: {}. Using defaults.", e);
            Config::default()
        });

        Ok(config)
    }

    /// Load an explicitly requested config file. Errors are not recovered.
    pub fn load_from(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// The configured layouts, or the built-in ones when none are set
    pub fn layout_table(&self) -> crate::error::Result<LayoutTable> {
        if self.layouts.is_empty() {
            return Ok(LayoutTable::builtin());
        }

        LayoutTable::new(
            self.layouts
                .iter()
                .map(|layout| (layout.language.clone(), layout.rows.clone()))
                .collect(),
        )
    }

    /// Repeat interval, clamped to the supported range
    pub fn repeat_interval(&self) -> Duration {
        let ms = self
            .repeat_interval_ms
            .unwrap_or(DEFAULT_REPEAT_INTERVAL_MS)
            .clamp(MIN_REPEAT_INTERVAL_MS, MAX_REPEAT_INTERVAL_MS);
        Duration::from_millis(ms)
    }
}

pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.repeat_interval(), Duration::from_millis(100));
        assert_eq!(config.layout_table().unwrap(), LayoutTable::builtin());
    }

    #[test]
    fn test_repeat_interval_clamped() {
        let config = Config {
            repeat_interval_ms: Some(1),
            ..Config::default()
        };
        assert_eq!(config.repeat_interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "language": "dv",
                "repeat_interval_ms": 250,
                "layouts": [
                    {{ "language": "dv", "rows": [["'", ",", "."], ["Backspace"]] }},
                    {{ "language": "en", "rows": [["Q", "W"]] }}
                ]
            }}"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.language.as_deref(), Some("dv"));
        assert_eq!(config.repeat_interval(), Duration::from_millis(250));

        let table = config.layout_table().unwrap();
        let languages: Vec<&str> = table.languages().collect();
        assert_eq!(languages, vec!["dv", "en"]);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "language": "ru" }}"#).unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.language.as_deref(), Some("ru"));
        assert!(config.layouts.is_empty());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(Config::load_from(file.path()).is_err());
        assert!(Config::load_from(Path::new("/nonexistent/vkeys.json")).is_err());
    }

    #[test]
    fn test_invalid_custom_layout_rejected() {
        let config = Config {
            layouts: vec![LayoutConfig {
                language: "xx".to_string(),
                rows: vec![vec![]],
            }],
            ..Config::default()
        };
        assert!(config.layout_table().is_err());
    }
}
