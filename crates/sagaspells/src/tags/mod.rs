//! Tag support for the spell catalog.
//!
//! Tags are semantic labels ("fire", "aoe", "high-complexity") shipped as a separate dataset
//! alongside the spells. A tag does not live on the spell record; instead each tag lists the
//! names of the spells carrying it in `matches`. Tags are read-only and loaded once per
//! session.
//!
//! ## Tag Dataset Shape
//!
//! ```json
//! { "tags": [ { "tag": "fire", "name": "Fire", "description": "...", "matches": ["Fireball"] } ] }
//! ```
//!
//! `tag` and `name` are required strings; `description` and `matches` may be absent.
//!
//! See [`categories`] for how tags are bucketed for display.

pub mod categories;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::Spell;
use crate::schema::{FieldReader, ValidationError};

pub use categories::{categorize, TagCategory, TagOption, OTHER_CATEGORY, TAG_CATEGORIES};

/// A semantic label and the spells it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Stable id, e.g. `"fire-damage"`.
    pub tag: String,
    /// Display label, e.g. `"Fire Damage"`.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub matches: Vec<String>,
}

impl Tag {
    pub fn matches_spell(&self, spell: &Spell) -> bool {
        self.matches.iter().any(|name| name == &spell.spell_name)
    }

    /// `"Fire (12)"`: the name and how many spells carry the tag.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.matches.len())
    }
}

/// All loaded tags, sorted ascending by display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    pub fn new(mut tags: Vec<Tag>) -> Self {
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Self { tags }
    }

    /// Validates a raw `{ "tags": [...] }` document.
    pub fn from_json(raw: &Value) -> Result<Self, ValidationError> {
        let Some(Value::Array(items)) = raw.get("tags") else {
            let found = raw.get("tags").unwrap_or(&Value::Null);
            return Err(ValidationError::single("$.tags", "array", found));
        };

        let mut issues = Vec::new();
        let mut tags = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let path = format!("$.tags[{}]", i);
            let Value::Object(obj) = item else {
                issues.extend(ValidationError::single(&path, "object", item).issues);
                continue;
            };
            let mut fields = FieldReader::new(obj, &path, &mut issues);
            let tag = fields.required_str("tag");
            let name = fields.required_str("name");
            let description = fields.optional_str("description");
            let matches = fields.string_list("matches");
            if let (true, Some(tag), Some(name)) = (fields.clean(), tag, name) {
                tags.push(Tag {
                    tag,
                    name,
                    description,
                    matches,
                });
            }
        }

        if issues.is_empty() {
            Ok(Self::new(tags))
        } else {
            Err(ValidationError { issues })
        }
    }

    pub fn get(&self, tag_id: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.tag == tag_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Ids of the tags whose `matches` include `spell`.
    pub fn tags_for(&self, spell: &Spell) -> Vec<&str> {
        self.tags
            .iter()
            .filter(|t| t.matches_spell(spell))
            .map(|t| t.tag.as_str())
            .collect()
    }
}
