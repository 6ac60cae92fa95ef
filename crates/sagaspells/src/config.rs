//! # Configuration
//!
//! Saga configuration is managed by [`confique`], which handles layered loading
//! from a TOML file and environment variables.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `SAGA_SPELLS_SOURCE`, `SAGA_STORAGE_KEY`, etc.
//! 2. **Config file**: `<data dir>/saga.toml`.
//! 3. **Compiled defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `spells_source` | `spells.json` | Path or URL of the spell dataset |
//! | `tags_source` | `spells.tags.json` | Path or URL of the tag dataset |
//! | `storage_key` | `saga-spellbooks` | Name of the persisted spellbook slot |
//! | `complexity_min` | `0` | Lower bound of the default complexity filter |
//! | `complexity_max` | `10` | Upper bound of the default complexity filter |
//! | `fetch_timeout_secs` | `10` | HTTP timeout for dataset fetches |

use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::catalog::DataSource;
use crate::error::{Result, SagaError};
use crate::filter::ComplexityRange;

pub const CONFIG_FILE_NAME: &str = "saga.toml";

/// Configuration for saga, stored in `saga.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SagaConfig {
    /// Path or `http(s)://` URL of the spell dataset.
    #[config(env = "SAGA_SPELLS_SOURCE", default = "spells.json")]
    pub spells_source: String,

    /// Path or `http(s)://` URL of the tag dataset.
    #[config(env = "SAGA_TAGS_SOURCE", default = "spells.tags.json")]
    pub tags_source: String,

    /// Key of the persisted spellbook collection.
    #[config(env = "SAGA_STORAGE_KEY", default = "saga-spellbooks")]
    pub storage_key: String,

    #[config(env = "SAGA_COMPLEXITY_MIN", default = 0)]
    pub complexity_min: i64,

    #[config(env = "SAGA_COMPLEXITY_MAX", default = 10)]
    pub complexity_max: i64,

    #[config(env = "SAGA_FETCH_TIMEOUT_SECS", default = 10)]
    pub fetch_timeout_secs: u64,
}

impl Default for SagaConfig {
    fn default() -> Self {
        Self {
            spells_source: "spells.json".to_string(),
            tags_source: "spells.tags.json".to_string(),
            storage_key: "saga-spellbooks".to_string(),
            complexity_min: 0,
            complexity_max: 10,
            fetch_timeout_secs: 10,
        }
    }
}

impl SagaConfig {
    /// Loads from the environment, then `<data_dir>/saga.toml`, then defaults.
    /// A missing file is not an error.
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(data_dir.join(CONFIG_FILE_NAME))
            .load()
            .map_err(|e| SagaError::Config(e.to_string()))
    }

    /// Like [`SagaConfig::load`], but a broken config degrades to the defaults.
    pub fn load_or_default(data_dir: &Path) -> Self {
        Self::load(data_dir).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid configuration, using defaults");
            Self::default()
        })
    }

    pub fn spells_source(&self) -> DataSource {
        DataSource::parse(&self.spells_source)
    }

    pub fn tags_source(&self) -> DataSource {
        DataSource::parse(&self.tags_source)
    }

    /// The range a fresh or reset filter starts from.
    pub fn default_complexity_range(&self) -> ComplexityRange {
        ComplexityRange::new(self.complexity_min, self.complexity_max)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = SagaConfig::default();
        assert_eq!(config.storage_key, "saga-spellbooks");
        assert_eq!(config.default_complexity_range(), ComplexityRange::default());
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_sources_parse() {
        let config = SagaConfig {
            spells_source: "https://example.com/spells.json".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.spells_source(),
            DataSource::Http("https://example.com/spells.json".to_string())
        );
        assert_eq!(
            config.tags_source(),
            DataSource::File(PathBuf::from("spells.tags.json"))
        );
    }

    #[test]
    fn test_reversed_bounds_are_normalized() {
        let config = SagaConfig {
            complexity_min: 8,
            complexity_max: 2,
            ..Default::default()
        };
        assert_eq!(config.default_complexity_range(), ComplexityRange::new(2, 8));
    }

    #[test]
    fn test_reads_config_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "storage_key = \"books\"\ncomplexity_max = 12\n",
        )
        .unwrap();

        let config = SagaConfig::load(dir.path()).unwrap();
        assert_eq!(config.storage_key, "books");
        assert_eq!(config.complexity_max, 12);
        assert_eq!(config.spells_source, "spells.json");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(SagaConfig::load(dir.path()).unwrap(), SagaConfig::default());
    }

    #[test]
    fn test_broken_file_degrades_to_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "complexity_max = \"lots\"").unwrap();

        assert!(matches!(
            SagaConfig::load(dir.path()),
            Err(SagaError::Config(_))
        ));
        assert_eq!(SagaConfig::load_or_default(dir.path()), SagaConfig::default());
    }

    #[test]
    fn test_serializes_to_toml() {
        let rendered = toml::to_string(&SagaConfig::default()).unwrap();
        assert!(rendered.contains("storage_key = \"saga-spellbooks\""));
    }
}
