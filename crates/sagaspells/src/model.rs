//! # Domain Model: Spells and Spellbooks
//!
//! This module defines the two record types everything else operates on:
//! [`Spell`] (an immutable catalog entry) and [`Spellbook`] (a user-curated, persisted
//! collection of spells).
//!
//! ## Identity and Ordering
//!
//! `spell_name` is the natural identity of a spell. Equality checks, deduplication and
//! ordering all use it, compared case-sensitively and lexicographically (plain `str`
//! ordering, so `"Zap" < "acid"`).
//!
//! ## Spellbook Invariants
//!
//! - `spells` never holds two entries with the same `spell_name`.
//! - `spells` is in ascending `spell_name` order after every mutation.
//! - `updated_at >= created_at`, and `updated_at` strictly advances on every mutation.
//!
//! ## Timestamps
//!
//! Timestamps are produced at millisecond precision and serialized as ISO-8601 UTC strings
//! (`2024-05-01T12:30:00.250Z`), the format the browser build of the app persisted.
//! Generating them at storage precision means a save/load round trip reproduces them
//! exactly. [`next_timestamp`] guarantees strict advance even when the clock has not
//! ticked (or went backwards) since the previous mutation.

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::schema::deserialize_lenient_int;

/// One entry of the spell catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    pub spell_name: String,
    pub spell_class: String,
    pub school: String,
    #[serde(deserialize_with = "deserialize_lenient_int")]
    pub complexity: i64,
    #[serde(deserialize_with = "deserialize_lenient_int")]
    pub flare: i64,
    pub range: String,
    pub target: String,
    pub action: String,
    pub duration: String,
    pub check: String,
    pub skill: String,
    pub focus: String,
    pub spell_type: String,
    pub keywords: Option<String>,
    pub description: Option<String>,
    pub alt_description: Option<String>,
}

impl Spell {
    pub fn name(&self) -> &str {
        &self.spell_name
    }
}

/// Sorts spells ascending by name. Stable, so equal names keep their relative order.
pub fn sort_by_name(spells: &mut [Spell]) {
    spells.sort_by(|a, b| a.spell_name.cmp(&b.spell_name));
}

/// Sorts by name and drops later entries whose name was already seen.
pub fn normalize_members(mut spells: Vec<Spell>) -> Vec<Spell> {
    sort_by_name(&mut spells);
    spells.dedup_by(|later, earlier| later.spell_name == earlier.spell_name);
    spells
}

/// Current time truncated to the precision timestamps are stored at.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// A timestamp strictly later than `previous`, normally "now".
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now_millis();
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

fn serialize_iso_millis<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// A named, persisted collection of spells belonging to a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spellbook {
    pub id: String,
    pub name: String,
    pub character: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub spells: Vec<Spell>,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub updated_at: DateTime<Utc>,
}

impl Spellbook {
    /// Builds a fresh spellbook with a new id and `created_at == updated_at == now`.
    pub fn new(draft: SpellbookDraft) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            character: draft.character,
            description: draft.description,
            spells: normalize_members(draft.spells),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn contains(&self, spell_name: &str) -> bool {
        self.spells.iter().any(|s| s.spell_name == spell_name)
    }

    pub fn spell_names(&self) -> Vec<&str> {
        self.spells.iter().map(|s| s.spell_name.as_str()).collect()
    }

    /// Inserts `spell` at its sorted position.
    ///
    /// Returns `false` without touching the list when a spell with the same name is
    /// already a member (the existing entry wins).
    pub fn insert_spell(&mut self, spell: Spell) -> bool {
        match self
            .spells
            .binary_search_by(|s| s.spell_name.as_str().cmp(spell.spell_name.as_str()))
        {
            Ok(_) => false,
            Err(pos) => {
                self.spells.insert(pos, spell);
                true
            }
        }
    }

    /// Removes every member named `spell_name`. Returns whether anything was removed.
    pub fn remove_spell(&mut self, spell_name: &str) -> bool {
        let before = self.spells.len();
        self.spells.retain(|s| s.spell_name != spell_name);
        sort_by_name(&mut self.spells);
        self.spells.len() != before
    }

    /// Applies the provided fields. Does not bump `updated_at`; see [`Spellbook::touch`].
    pub fn apply(&mut self, patch: SpellbookPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(character) = patch.character {
            self.character = character;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(spells) = patch.spells {
            self.spells = normalize_members(spells);
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = next_timestamp(self.updated_at);
    }

    /// Restores the invariants on a record read from storage.
    ///
    /// Returns `true` if anything had to change.
    pub fn repair(&mut self) -> bool {
        let mut repaired = false;

        let sorted = self
            .spells
            .windows(2)
            .all(|w| w[0].spell_name < w[1].spell_name);
        if !sorted {
            let spells = std::mem::take(&mut self.spells);
            self.spells = normalize_members(spells);
            repaired = true;
        }

        if self.updated_at < self.created_at {
            self.updated_at = self.created_at;
            repaired = true;
        }

        repaired
    }
}

/// Input for creating a spellbook: everything except id and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellbookDraft {
    pub name: String,
    pub character: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub spells: Vec<Spell>,
}

impl SpellbookDraft {
    pub fn new(name: impl Into<String>, character: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            character: character.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_spells(mut self, spells: Vec<Spell>) -> Self {
        self.spells = spells;
        self
    }
}

/// Partial update of a spellbook. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellbookPatch {
    pub name: Option<String>,
    pub character: Option<String>,
    pub description: Option<String>,
    pub spells: Option<Vec<Spell>>,
}

impl SpellbookPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn character(mut self, character: impl Into<String>) -> Self {
        self.character = Some(character.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn spells(mut self, spells: Vec<Spell>) -> Self {
        self.spells = Some(spells);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.character.is_none()
            && self.description.is_none()
            && self.spells.is_none()
    }
}
