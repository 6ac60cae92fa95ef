//! # Storage Layer
//!
//! This module defines how spellbooks are persisted. It is split in two:
//!
//! 1. **Backend** ([`backend::StorageBackend`]): a dumb durable key-value slot. It knows how
//!    to read and write a string under a key, nothing about spellbooks.
//! 2. **Store** ([`spellbook_store::SpellbookStore`]): the business rules. It owns the
//!    in-memory copy of the collection, enforces the spellbook invariants, and writes the
//!    whole collection through to the backend on every mutation.
//!
//! Change notification is not the store's concern: the command layer reports what changed
//! in its `CmdResult`, and callers re-render from that.
//!
//! ## Persistence Model
//!
//! The entire collection is one JSON array stored under a single key (by default
//! `saga-spellbooks`). There is no batching: each mutating call serializes and saves the full
//! collection before returning, so a crash right after a call observes the post-call state.
//!
//! ## Initialization and Repair
//!
//! The slot is read lazily on first access and cached for reads. Every mutation re-reads
//! it before applying its change, so edits another process saved in the meantime are kept.
//! Call `reload()` to make plain reads pick them up too. Absent or blank content means an
//! empty collection. Each record read back is repaired if it was edited outside the app:
//! - `spells` re-sorted by name, duplicate names dropped (first kept)
//! - `updatedAt` raised to `createdAt` if it lies before it
//! - records repeating an earlier `id` dropped
//!
//! Content that is not a valid spellbook array is an error rather than an empty
//! collection; treating it as empty would overwrite the user's data on the next write.
//!
//! ## Missing Ids
//!
//! Operations aimed at an id that does not exist do nothing and succeed. They report it in
//! their return value (`None`, [`MemberChange::SpellbookNotFound`]) instead of failing.
//!
//! ## Concurrency
//!
//! Every mutation takes `&mut self`, so read-modify-persist cycles on one store are
//! exclusive. To share a store between threads, put it behind a `Mutex`.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one JSON file per key in a data directory.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── saga.toml              # Optional configuration
//! └── saga-spellbooks.json   # The spellbook collection
//! ```

use crate::error::Result;
use crate::model::{Spell, Spellbook, SpellbookDraft, SpellbookPatch};

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod spellbook_store;

pub use spellbook_store::SpellbookStore;

/// Outcome of adding or removing a single member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberChange {
    /// The spell was added; carries the updated spellbook.
    Added(Spellbook),
    /// The spell was removed; carries the updated spellbook.
    Removed(Spellbook),
    /// A spell with that name was already a member. Nothing changed.
    AlreadyPresent,
    /// No member has that name. Nothing changed.
    NotPresent,
    /// No spellbook has that id. Nothing changed.
    SpellbookNotFound,
}

impl MemberChange {
    pub fn changed(&self) -> bool {
        matches!(self, MemberChange::Added(_) | MemberChange::Removed(_))
    }

    pub fn spellbook(&self) -> Option<&Spellbook> {
        match self {
            MemberChange::Added(book) | MemberChange::Removed(book) => Some(book),
            _ => None,
        }
    }
}

/// Abstract interface for the spellbook collection.
pub trait CollectionStore {
    /// All spellbooks in stored order (creation order).
    fn list(&self) -> Result<Vec<Spellbook>>;

    /// All spellbooks sorted by name, as offered in selection menus.
    fn list_sorted(&self) -> Result<Vec<Spellbook>> {
        let mut books = self.list()?;
        books.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(books)
    }

    fn get(&self, id: &str) -> Result<Option<Spellbook>>;

    /// Creates and persists a spellbook, appending it to the collection.
    fn create(&mut self, draft: SpellbookDraft) -> Result<Spellbook>;

    /// Merges the provided fields and bumps `updated_at`. `None` if the id is unknown.
    fn update(&mut self, id: &str, patch: SpellbookPatch) -> Result<Option<Spellbook>>;

    /// Removes a spellbook permanently. Returns the removed record, `None` if unknown.
    fn delete(&mut self, id: &str) -> Result<Option<Spellbook>>;

    fn add_spell(&mut self, id: &str, spell: Spell) -> Result<MemberChange>;

    fn remove_spell(&mut self, id: &str, spell_name: &str) -> Result<MemberChange>;
}
