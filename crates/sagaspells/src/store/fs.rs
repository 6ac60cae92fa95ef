use super::fs_backend::FsBackend;
use super::spellbook_store::SpellbookStore;
use std::path::PathBuf;

pub type FileStore = SpellbookStore<FsBackend>;

impl FileStore {
    /// A store persisting to `<data_dir>/<key>.json`.
    pub fn new_fs(data_dir: PathBuf, key: impl Into<String>) -> Self {
        SpellbookStore::with_key(FsBackend::new(data_dir), key)
    }

    pub fn data_dir(&self) -> &std::path::Path {
        self.backend.root()
    }
}
