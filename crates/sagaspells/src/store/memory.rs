use super::mem_backend::MemBackend;
use super::spellbook_store::SpellbookStore;

pub type InMemoryStore = SpellbookStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        SpellbookStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Spell, Spellbook, SpellbookDraft};
    use crate::store::CollectionStore;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_spellbooks(mut self, count: usize) -> Self {
            for i in 0..count {
                let draft = SpellbookDraft::new(
                    format!("Spellbook {}", i + 1),
                    format!("Character {}", i + 1),
                );
                self.store.create(draft).unwrap();
            }
            self
        }

        pub fn with_spellbook(mut self, name: &str, character: &str, spells: Vec<Spell>) -> Self {
            let draft = SpellbookDraft::new(name, character).with_spells(spells);
            self.store.create(draft).unwrap();
            self
        }

        /// The first spellbook with this name.
        pub fn find(&self, name: &str) -> Spellbook {
            self.store
                .list()
                .unwrap()
                .into_iter()
                .find(|b| b.name == name)
                .unwrap()
        }
    }
}
