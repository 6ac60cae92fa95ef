//! # Initialization
//!
//! Builds a ready-to-use [`SagaContext`]: resolves the data directory, loads the
//! configuration from it, and opens the spellbook store.
//!
//! ## Data Directory Resolution
//!
//! 1. `SAGA_DATA_DIR` environment variable, if set (mainly for tests and scripting).
//! 2. The `data_override` argument, if given.
//! 3. The OS data directory from the `directories` crate
//!    (e.g. `~/.local/share/saga-spells` on Linux).
//!
//! The directory is not created here. The store creates it on its first write.
//!
//! ## Datasets
//!
//! Loading the spell and tag datasets is asynchronous and happens once per session through
//! [`SagaContext::load_library`], which installs the result into the API.

use crate::api::SagaApi;
use crate::catalog::Loader;
use crate::config::SagaConfig;
use crate::error::{Result, SagaError};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "SAGA_DATA_DIR";

pub struct SagaContext {
    pub api: SagaApi<FileStore>,
    pub config: SagaConfig,
    pub data_dir: PathBuf,
}

impl SagaContext {
    /// Fetches both datasets from the configured sources and hands them to the API.
    pub async fn load_library(&mut self) -> Result<()> {
        let loader = Loader::from_config(&self.config);
        let library = loader
            .load_library(&self.config.spells_source(), &self.config.tags_source())
            .await?;
        self.api.set_library(library);
        Ok(())
    }
}

/// Picks the data directory, see the module docs for the order.
pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = data_override {
        return Ok(dir);
    }
    ProjectDirs::from("com", "saga", "saga-spells")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SagaError::Config("Could not determine a data directory".to_string()))
}

/// Initialize the saga context with config and store setup.
///
/// # Examples
///
/// ```ignore
/// let mut ctx = initialize(None)?;
/// ctx.load_library().await?;
/// let view = ctx.api.browse(&ctx.api.new_filter(), GroupingKey::School);
/// ```
pub fn initialize(data_override: Option<PathBuf>) -> Result<SagaContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = SagaConfig::load_or_default(&data_dir);

    let store = FileStore::new_fs(data_dir.clone(), config.storage_key.clone());
    let storage_path = store.storage_path();
    let api = SagaApi::new(store, storage_path)
        .with_default_range(config.default_complexity_range());

    tracing::debug!(data_dir = %data_dir.display(), "initialized saga context");
    Ok(SagaContext {
        api,
        config,
        data_dir,
    })
}
