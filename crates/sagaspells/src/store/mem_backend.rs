use super::backend::StorageBackend;
use crate::error::{Result, SagaError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` without a lock.
#[derive(Default)]
pub struct MemBackend {
    slots: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Test helper to put raw content in a slot, as an external edit would.
    pub fn set_raw(&self, key: &str, content: &str) {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), content.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    /// Number of successful `save_slot` calls.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl StorageBackend for MemBackend {
    fn load_slot(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn save_slot(&self, key: &str, content: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(SagaError::Store("Simulated write error".to_string()));
        }
        self.set_raw(key, content);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        PathBuf::from(format!("memory://{}", key))
    }
}
