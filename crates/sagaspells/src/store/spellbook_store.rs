use super::backend::StorageBackend;
use super::{CollectionStore, MemberChange};
use crate::error::{Result, SagaError};
use crate::model::{Spell, Spellbook, SpellbookDraft, SpellbookPatch};
use once_cell::unsync::OnceCell;
use std::collections::HashSet;
use std::path::PathBuf;

pub const DEFAULT_STORAGE_KEY: &str = "saga-spellbooks";

pub struct SpellbookStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    key: String,
    books: OnceCell<Vec<Spellbook>>,
}

impl<B: StorageBackend> SpellbookStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            books: OnceCell::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Where the collection is persisted.
    pub fn storage_path(&self) -> PathBuf {
        self.backend.slot_path(&self.key)
    }

    /// Drops the cached collection so the next access re-reads the slot.
    /// Picks up edits made to the storage by another process.
    pub fn reload(&mut self) {
        self.books = OnceCell::new();
    }

    fn books(&self) -> Result<&Vec<Spellbook>> {
        self.books.get_or_try_init(|| self.read_slot())
    }

    fn read_slot(&self) -> Result<Vec<Spellbook>> {
        let raw = match self.backend.load_slot(&self.key)? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => {
                tracing::debug!(key = %self.key, "no stored spellbooks, starting empty");
                return Ok(Vec::new());
            }
        };

        let stored: Vec<Spellbook> = serde_json::from_str(&raw).map_err(|e| {
            SagaError::Store(format!(
                "stored spellbooks under '{}' are unreadable: {}",
                self.key, e
            ))
        })?;

        let mut seen = HashSet::new();
        let mut books = Vec::with_capacity(stored.len());
        for mut book in stored {
            if !seen.insert(book.id.clone()) {
                tracing::warn!(id = %book.id, "dropping spellbook with duplicate id");
                continue;
            }
            if book.repair() {
                tracing::warn!(id = %book.id, name = %book.name, "repaired stored spellbook");
            }
            books.push(book);
        }

        tracing::debug!(key = %self.key, count = books.len(), "loaded spellbooks");
        Ok(books)
    }

    /// Persists `books` and only then makes it the current state.
    /// A failed write leaves the in-memory collection untouched.
    fn commit(&mut self, books: Vec<Spellbook>) -> Result<()> {
        let json = serde_json::to_string(&books)?;
        self.backend.save_slot(&self.key, &json)?;
        self.books = OnceCell::from(books);
        Ok(())
    }

    /// Re-reads the slot so a read-modify-persist cycle starts from what is stored now.
    /// The cache is refreshed even if the cycle ends without a write.
    fn working_copy(&mut self) -> Result<Vec<Spellbook>> {
        let books = self.read_slot()?;
        self.books = OnceCell::from(books.clone());
        Ok(books)
    }
}

impl<B: StorageBackend> CollectionStore for SpellbookStore<B> {
    fn list(&self) -> Result<Vec<Spellbook>> {
        Ok(self.books()?.clone())
    }

    fn get(&self, id: &str) -> Result<Option<Spellbook>> {
        Ok(self.books()?.iter().find(|b| b.id == id).cloned())
    }

    fn create(&mut self, draft: SpellbookDraft) -> Result<Spellbook> {
        let book = Spellbook::new(draft);
        let mut books = self.working_copy()?;
        books.push(book.clone());
        self.commit(books)?;
        tracing::info!(id = %book.id, name = %book.name, "created spellbook");
        Ok(book)
    }

    fn update(&mut self, id: &str, patch: SpellbookPatch) -> Result<Option<Spellbook>> {
        let mut books = self.working_copy()?;
        let Some(book) = books.iter_mut().find(|b| b.id == id) else {
            tracing::debug!(id, "update skipped, no such spellbook");
            return Ok(None);
        };
        book.apply(patch);
        book.touch();
        let updated = book.clone();

        self.commit(books)?;
        tracing::info!(id, name = %updated.name, "updated spellbook");
        Ok(Some(updated))
    }

    fn delete(&mut self, id: &str) -> Result<Option<Spellbook>> {
        let mut books = self.working_copy()?;
        let Some(index) = books.iter().position(|b| b.id == id) else {
            tracing::debug!(id, "delete skipped, no such spellbook");
            return Ok(None);
        };
        let removed = books.remove(index);

        self.commit(books)?;
        tracing::info!(id, name = %removed.name, "deleted spellbook");
        Ok(Some(removed))
    }

    fn add_spell(&mut self, id: &str, spell: Spell) -> Result<MemberChange> {
        let mut books = self.working_copy()?;
        let Some(book) = books.iter_mut().find(|b| b.id == id) else {
            return Ok(MemberChange::SpellbookNotFound);
        };
        let spell_name = spell.spell_name.clone();
        if !book.insert_spell(spell) {
            tracing::debug!(id, spell = %spell_name, "spell already in spellbook");
            return Ok(MemberChange::AlreadyPresent);
        }
        book.touch();
        let updated = book.clone();

        self.commit(books)?;
        tracing::info!(id, spell = %spell_name, "added spell to spellbook");
        Ok(MemberChange::Added(updated))
    }

    fn remove_spell(&mut self, id: &str, spell_name: &str) -> Result<MemberChange> {
        let mut books = self.working_copy()?;
        let Some(book) = books.iter_mut().find(|b| b.id == id) else {
            return Ok(MemberChange::SpellbookNotFound);
        };
        if !book.remove_spell(spell_name) {
            return Ok(MemberChange::NotPresent);
        }
        book.touch();
        let updated = book.clone();

        self.commit(books)?;
        tracing::info!(id, spell = spell_name, "removed spell from spellbook");
        Ok(MemberChange::Removed(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::store::memory::InMemoryStore;
    use crate::test_utils::spell;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    fn create(store: &mut InMemoryStore, name: &str) -> Spellbook {
        store
            .create(SpellbookDraft::new(name, "Mage"))
            .expect("create")
    }

    #[test]
    fn test_empty_slot_lists_nothing() {
        let store = store();
        assert!(store.list().unwrap().is_empty());
        assert_eq!(store.backend.write_count(), 0);
    }

    #[test]
    fn test_blank_slot_is_treated_as_absent() {
        let backend = MemBackend::new();
        backend.set_raw(DEFAULT_STORAGE_KEY, "  \n");
        let store = SpellbookStore::with_backend(backend);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_slot_is_an_error() {
        let backend = MemBackend::new();
        backend.set_raw(DEFAULT_STORAGE_KEY, "{not json");
        let mut store = SpellbookStore::with_backend(backend);
        assert!(matches!(store.list(), Err(SagaError::Store(_))));
        assert!(store.create(SpellbookDraft::new("Test", "Mage")).is_err());
        assert_eq!(
            store.backend.raw(DEFAULT_STORAGE_KEY).as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn test_create_appends_and_persists() {
        let mut store = store();
        let first = create(&mut store, "Zeta");
        let second = create(&mut store, "Alpha");

        let ids: Vec<_> = store.list().unwrap().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![first.id.clone(), second.id.clone()]);
        assert_eq!(store.backend.write_count(), 2);

        let raw = store.backend.raw(DEFAULT_STORAGE_KEY).unwrap();
        let persisted: Vec<Spellbook> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, store.list().unwrap());
    }

    #[test]
    fn test_list_sorted_orders_by_name() {
        let mut store = store();
        create(&mut store, "Zeta");
        create(&mut store, "Alpha");
        let names: Vec<_> = store
            .list_sorted()
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_get_unknown_is_none() {
        let store = store();
        assert!(store.get("nope").unwrap().is_none());
    }

    #[test]
    fn test_update_merges_and_bumps_timestamp() {
        let mut store = store();
        let book = create(&mut store, "Test");

        let updated = store
            .update(&book.id, SpellbookPatch::default().description("Fire only"))
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Test");
        assert_eq!(updated.description, "Fire only");
        assert!(updated.updated_at > book.updated_at);
        assert_eq!(updated.created_at, book.created_at);
        assert_eq!(store.get(&book.id).unwrap(), Some(updated));
    }

    #[test]
    fn test_update_with_spells_normalizes_them() {
        let mut store = store();
        let book = create(&mut store, "Test");
        let updated = store
            .update(
                &book.id,
                SpellbookPatch::default().spells(vec![spell("B"), spell("A"), spell("B")]),
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.spell_names(), vec!["A", "B"]);
    }

    #[test]
    fn test_update_unknown_id_does_not_write() {
        let mut store = store();
        create(&mut store, "Test");
        let writes = store.backend.write_count();
        assert!(store
            .update("missing", SpellbookPatch::default().name("X"))
            .unwrap()
            .is_none());
        assert_eq!(store.backend.write_count(), writes);
    }

    #[test]
    fn test_delete() {
        let mut store = store();
        let keep = create(&mut store, "Keep");
        let gone = create(&mut store, "Gone");

        let removed = store.delete(&gone.id).unwrap().unwrap();
        assert_eq!(removed.id, gone.id);
        assert!(store.delete(&gone.id).unwrap().is_none());

        let ids: Vec<_> = store.list().unwrap().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![keep.id]);
    }

    #[test]
    fn test_add_spell_inserts_sorted_and_ignores_duplicates() {
        let mut store = store();
        let book = create(&mut store, "Test");

        assert!(store.add_spell(&book.id, spell("Fireball")).unwrap().changed());
        let change = store.add_spell(&book.id, spell("Acid Arrow")).unwrap();
        assert_eq!(
            change.spellbook().unwrap().spell_names(),
            vec!["Acid Arrow", "Fireball"]
        );

        let before = store.get(&book.id).unwrap().unwrap();
        let writes = store.backend.write_count();
        assert_eq!(
            store.add_spell(&book.id, spell("Fireball")).unwrap(),
            MemberChange::AlreadyPresent
        );
        assert_eq!(store.get(&book.id).unwrap().unwrap(), before);
        assert_eq!(store.backend.write_count(), writes);
    }

    #[test]
    fn test_add_spell_unknown_book() {
        let mut store = store();
        assert_eq!(
            store.add_spell("missing", spell("Fireball")).unwrap(),
            MemberChange::SpellbookNotFound
        );
        assert_eq!(store.backend.write_count(), 0);
    }

    #[test]
    fn test_remove_spell() {
        let mut store = store();
        let book = store
            .create(
                SpellbookDraft::new("Test", "Mage")
                    .with_spells(vec![spell("Fireball"), spell("Acid Arrow")]),
            )
            .unwrap();

        let change = store.remove_spell(&book.id, "Fireball").unwrap();
        let updated = change.spellbook().unwrap();
        assert_eq!(updated.spell_names(), vec!["Acid Arrow"]);
        assert!(updated.updated_at > book.updated_at);

        assert_eq!(
            store.remove_spell(&book.id, "Fireball").unwrap(),
            MemberChange::NotPresent
        );
        assert_eq!(
            store.remove_spell("missing", "Acid Arrow").unwrap(),
            MemberChange::SpellbookNotFound
        );
    }

    #[test]
    fn test_failed_write_leaves_state_unchanged() {
        let mut store = store();
        let book = create(&mut store, "Test");
        store.backend.set_simulate_write_error(true);

        assert!(store.add_spell(&book.id, spell("Fireball")).is_err());
        assert!(store.delete(&book.id).is_err());
        assert!(store.create(SpellbookDraft::new("Other", "Rogue")).is_err());

        assert_eq!(store.list().unwrap(), vec![book]);
    }

    #[test]
    fn test_reload_sees_external_edits() {
        let mut store = store();
        create(&mut store, "Test");

        store.backend.set_raw(DEFAULT_STORAGE_KEY, "[]");
        assert_eq!(store.list().unwrap().len(), 1);

        store.reload();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_load_repairs_records() {
        let mut book = Spellbook::new(SpellbookDraft::new("Test", "Mage"));
        book.spells = vec![spell("B"), spell("A"), spell("B")];
        book.updated_at = book.created_at - Duration::hours(1);
        let duplicate = book.clone();

        let backend = MemBackend::new();
        backend.set_raw(
            DEFAULT_STORAGE_KEY,
            &serde_json::to_string(&vec![book.clone(), duplicate]).unwrap(),
        );
        let store = SpellbookStore::with_backend(backend);

        let books = store.list().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].spell_names(), vec!["A", "B"]);
        assert_eq!(books[0].updated_at, book.created_at);
        // repairs happen on read, not as a write
        assert_eq!(store.backend.write_count(), 0);
    }

    #[test]
    fn test_custom_key() {
        let mut store = SpellbookStore::with_key(MemBackend::new(), "books-v2");
        store.create(SpellbookDraft::new("Test", "Mage")).unwrap();
        assert!(store.backend.raw("books-v2").is_some());
        assert!(store.backend.raw(DEFAULT_STORAGE_KEY).is_none());
        assert_eq!(store.storage_path(), PathBuf::from("memory://books-v2"));
    }

    #[test]
    fn test_mutation_keeps_external_edits() {
        let mut store = store();
        create(&mut store, "Mine");

        let mut elsewhere = InMemoryStore::new();
        let theirs = create(&mut elsewhere, "Theirs");
        let mut stored: Vec<Spellbook> =
            serde_json::from_str(&store.backend.raw(DEFAULT_STORAGE_KEY).unwrap()).unwrap();
        stored[0].name = "Renamed".to_string();
        stored.push(theirs);
        store
            .backend
            .set_raw(DEFAULT_STORAGE_KEY, &serde_json::to_string(&stored).unwrap());

        // reads stay on the cached copy until the next cycle
        assert_eq!(store.list().unwrap().len(), 1);

        create(&mut store, "Third");
        let names: Vec<_> = store.list_sorted().unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["Renamed", "Theirs", "Third"]);
    }
}
