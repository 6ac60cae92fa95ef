//! # Spell Filtering
//!
//! A [`FilterSpec`] holds one value per filter dimension. Each *active* dimension becomes a
//! [`SpellPredicate`]; a spell is kept only if it satisfies all of them (logical AND).
//! Inactive dimensions (empty text, empty set, unbounded range) are not turned into
//! predicates at all, so they always pass.
//!
//! | Dimension | Active when | Passes when |
//! |-----------|-------------|-------------|
//! | `search_text` | non-empty | name or description contains it, case-insensitively |
//! | `classes` | non-empty | `spell_class` is in the set |
//! | `schools` | non-empty | `school` is in the set |
//! | `tags` | non-empty | any requested tag's `matches` lists the spell (OR within the dimension) |
//! | `complexity_range` | not [`ComplexityRange::ANY`] | complexity is zero, or within `[min, max]` |
//!
//! ## Zero Complexity
//!
//! A spell whose complexity is `0` passes the range check no matter the range. Missing and
//! unparseable complexities are coerced to `0` during validation, so such spells are never
//! hidden by the range filter. This is long-standing behaviour that the tests pin down.
//!
//! ## Output
//!
//! [`apply_filters`] returns a new vector holding the surviving spells in input order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::Spell;
use crate::tags::{Tag, TagSet};

/// Inclusive complexity bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityRange {
    pub min: i64,
    pub max: i64,
}

impl ComplexityRange {
    /// A range that filters nothing.
    pub const ANY: ComplexityRange = ComplexityRange {
        min: i64::MIN,
        max: i64::MAX,
    };

    /// Builds a range, swapping the bounds if they arrive reversed.
    pub fn new(a: i64, b: i64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_unbounded(&self) -> bool {
        *self == Self::ANY
    }
}

impl Default for ComplexityRange {
    /// The slider range of the filter panel.
    fn default() -> Self {
        Self { min: 0, max: 10 }
    }
}

/// The user's current filter selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    pub search_text: String,
    pub classes: BTreeSet<String>,
    pub schools: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    pub complexity_range: ComplexityRange,
}

impl FilterSpec {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    pub fn school(mut self, school: impl Into<String>) -> Self {
        self.schools.insert(school.into());
        self
    }

    pub fn tag(mut self, tag_id: impl Into<String>) -> Self {
        self.tags.insert(tag_id.into());
        self
    }

    pub fn complexity(mut self, range: ComplexityRange) -> Self {
        self.complexity_range = range;
        self
    }

    /// Clears every selection, keeping the given default range.
    pub fn reset(&mut self, default_range: ComplexityRange) {
        *self = Self {
            complexity_range: default_range,
            ..Default::default()
        };
    }

    /// Whether any dimension narrows the result. A bounded range counts, including the
    /// default one.
    pub fn is_active(&self) -> bool {
        self.has_selections() || !self.complexity_range.is_unbounded()
    }

    /// Whether the spec differs from a fresh one built with `baseline` as its range.
    pub fn is_modified(&self, baseline: ComplexityRange) -> bool {
        self.has_selections() || self.complexity_range != baseline
    }

    fn has_selections(&self) -> bool {
        !self.search_text.is_empty()
            || !self.classes.is_empty()
            || !self.schools.is_empty()
            || !self.tags.is_empty()
    }

    /// One predicate per active dimension.
    pub fn predicates<'a>(&'a self, tags: &'a TagSet) -> Vec<SpellPredicate<'a>> {
        let mut predicates = Vec::new();
        if !self.search_text.is_empty() {
            predicates.push(SpellPredicate::Text(self.search_text.to_lowercase()));
        }
        if !self.classes.is_empty() {
            predicates.push(SpellPredicate::Class(&self.classes));
        }
        if !self.schools.is_empty() {
            predicates.push(SpellPredicate::School(&self.schools));
        }
        if !self.tags.is_empty() {
            let requested: Vec<&Tag> = self.tags.iter().filter_map(|id| tags.get(id)).collect();
            predicates.push(SpellPredicate::AnyTag(requested));
        }
        if !self.complexity_range.is_unbounded() {
            predicates.push(SpellPredicate::Complexity(self.complexity_range));
        }
        predicates
    }
}

/// A single filter condition on a spell.
#[derive(Debug, Clone)]
pub enum SpellPredicate<'a> {
    /// Lower-cased needle matched against name and description.
    Text(String),
    Class(&'a BTreeSet<String>),
    School(&'a BTreeSet<String>),
    /// The requested tags that exist in the loaded set. Empty means nothing passes.
    AnyTag(Vec<&'a Tag>),
    Complexity(ComplexityRange),
}

impl SpellPredicate<'_> {
    pub fn matches(&self, spell: &Spell) -> bool {
        match self {
            SpellPredicate::Text(needle) => {
                spell.spell_name.to_lowercase().contains(needle.as_str())
                    || spell
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(needle.as_str()))
            }
            SpellPredicate::Class(classes) => classes.contains(&spell.spell_class),
            SpellPredicate::School(schools) => schools.contains(&spell.school),
            SpellPredicate::AnyTag(tags) => tags.iter().any(|t| t.matches_spell(spell)),
            SpellPredicate::Complexity(range) => {
                spell.complexity == 0 || range.contains(spell.complexity)
            }
        }
    }
}

/// Returns the spells passing every active dimension of `spec`, in input order.
pub fn apply_filters(spells: &[Spell], spec: &FilterSpec, tags: &TagSet) -> Vec<Spell> {
    if spells.is_empty() {
        return Vec::new();
    }

    let predicates = spec.predicates(tags);
    spells
        .iter()
        .filter(|spell| predicates.iter().all(|p| p.matches(spell)))
        .cloned()
        .collect()
}
