use super::backend::StorageBackend;
use crate::error::{Result, SagaError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores each slot as `<root>/<key>.json`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(SagaError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_slot(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(SagaError::Io)?;
        Ok(Some(content))
    }

    fn save_slot(&self, key: &str, content: &str) -> Result<()> {
        self.ensure_dir()?;
        let target = self.slot_path(key);

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, content).map_err(SagaError::Io)?;
        fs::rename(&tmp, target).map_err(SagaError::Io)?;

        Ok(())
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}
