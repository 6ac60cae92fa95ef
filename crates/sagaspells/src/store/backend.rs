use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw durable storage.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while SpellbookStore handles the "what" (invariants, repair, write-through).
pub trait StorageBackend {
    /// Read the content stored under `key`.
    /// Returns Ok(None) if nothing has been stored yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn load_slot(&self, key: &str) -> Result<Option<String>>;

    /// Replace the content stored under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_slot(&self, key: &str, content: &str) -> Result<()>;

    /// Where the slot lives. For FsBackend, the real path. For MemBackend, a virtual path.
    fn slot_path(&self, key: &str) -> PathBuf;
}
