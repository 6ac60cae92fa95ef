//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point
//! for a UI. It holds the store and the session's loaded [`Library`].
//!
//! ## What the API Does
//!
//! - **Dispatches** to the command functions
//! - **Resolves** spell names against the loaded catalog for membership changes
//! - **Returns** structured `Result<CmdResult>` values
//!
//! Business logic belongs in `commands/*.rs`; the API adds none.
//!
//! ## Generic Over CollectionStore
//!
//! `SagaApi<S: CollectionStore>` works with any store:
//! - Production: `SagaApi<FileStore>`
//! - Testing: `SagaApi<InMemoryStore>`

use std::path::{Path, PathBuf};

use crate::catalog::Library;
use crate::commands::{self, CmdResult};
use crate::error::{Result, SagaError};
use crate::filter::{ComplexityRange, FilterSpec};
use crate::grouping::GroupingKey;
use crate::model::{Spell, SpellbookDraft, SpellbookPatch};
use crate::store::CollectionStore;
use crate::tags::{categorize, TagCategory};

pub struct SagaApi<S: CollectionStore> {
    store: S,
    library: Library,
    default_range: ComplexityRange,
    storage_path: PathBuf,
}

impl<S: CollectionStore> SagaApi<S> {
    pub fn new(store: S, storage_path: PathBuf) -> Self {
        Self {
            store,
            library: Library::default(),
            default_range: ComplexityRange::default(),
            storage_path,
        }
    }

    pub fn with_default_range(mut self, range: ComplexityRange) -> Self {
        self.default_range = range;
        self
    }

    /// Installs the datasets loaded at session start.
    pub fn set_library(&mut self, library: Library) {
        self.library = library;
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Where spellbooks are persisted.
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// A filter with nothing selected and the configured complexity range.
    pub fn new_filter(&self) -> FilterSpec {
        FilterSpec::default().complexity(self.default_range)
    }

    pub fn reset_filter(&self, spec: &mut FilterSpec) {
        spec.reset(self.default_range);
    }

    /// Whether `spec` differs from [`new_filter`](Self::new_filter).
    pub fn is_filter_modified(&self, spec: &FilterSpec) -> bool {
        spec.is_modified(self.default_range)
    }

    pub fn browse(&self, spec: &FilterSpec, key: GroupingKey) -> CmdResult {
        commands::browse::run(&self.library, spec, key)
    }

    pub fn tag_categories(&self) -> Vec<TagCategory> {
        categorize(&self.library.tags)
    }

    pub fn create_spellbook(&mut self, draft: SpellbookDraft) -> Result<CmdResult> {
        commands::create::run(&mut self.store, draft)
    }

    pub fn get_spellbook(&self, id: &str) -> Result<CmdResult> {
        commands::get::run(&self.store, id)
    }

    pub fn list_spellbooks(&self, sorted: bool) -> Result<CmdResult> {
        commands::get::list(&self.store, sorted)
    }

    pub fn update_spellbook(&mut self, id: &str, patch: SpellbookPatch) -> Result<CmdResult> {
        commands::update::run(&mut self.store, id, patch)
    }

    pub fn delete_spellbook(&mut self, id: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn add_spell(&mut self, id: &str, spell: Spell) -> Result<CmdResult> {
        commands::members::add(&mut self.store, id, spell)
    }

    /// Adds the catalog spell with this name.
    pub fn add_spell_by_name(&mut self, id: &str, spell_name: &str) -> Result<CmdResult> {
        let spell = self
            .library
            .catalog
            .get(spell_name)
            .cloned()
            .ok_or_else(|| {
                SagaError::Api(format!("No spell named '{}' in the catalog", spell_name))
            })?;
        commands::members::add(&mut self.store, id, spell)
    }

    pub fn remove_spell(&mut self, id: &str, spell_name: &str) -> Result<CmdResult> {
        commands::members::remove(&mut self.store, id, spell_name)
    }

    /// Exports the spells matching `spec`.
    pub fn export_catalog(&self, spec: &FilterSpec, path: &Path) -> Result<CmdResult> {
        let spells = crate::filter::apply_filters(
            self.library.catalog.spells(),
            spec,
            &self.library.tags,
        );
        commands::export::catalog(&spells, path)
    }

    pub fn export_spellbook(&self, id: &str, path: &Path) -> Result<CmdResult> {
        commands::export::spellbook(&self.store, id, path)
    }
}
