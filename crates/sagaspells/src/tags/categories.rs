//! Display categories for tags.
//!
//! The tag picker shows tags grouped under headings. The grouping is a fixed table from
//! heading to known tag ids ([`TAG_CATEGORIES`]); it is data, not state, so adding a tag id
//! or a heading is a one-line edit.
//!
//! Rules:
//! - Headings appear in table order; a heading with no loaded tag is omitted.
//! - Within a heading, tags keep the [`TagSet`] order (ascending by name).
//! - Loaded tags that no heading lists go to [`OTHER_CATEGORY`], always last, omitted when
//!   empty.

use serde::Serialize;
use std::collections::HashSet;

use super::{Tag, TagSet};

pub const OTHER_CATEGORY: &str = "Other";

pub const TAG_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Spell Type",
        &[
            "offensive",
            "defensive",
            "healing",
            "control",
            "utility",
            "aoe",
            "buff",
            "debuff",
            "summoning",
            "transformation",
            "movement",
        ],
    ),
    (
        "Elements",
        &[
            "fire",
            "water",
            "air",
            "earth",
            "elemental",
            "fire-damage",
            "electrical-damage",
            "acid-damage",
            "etheric-damage",
            "psychic-damage",
            "disintegration-damage",
        ],
    ),
    (
        "Spell Class",
        &["animism", "elementalism", "eldritch", "sorcery"],
    ),
    (
        "Schools",
        &[
            "necromancy",
            "alchemy",
            "telekinesis",
            "hydromancy",
            "aeromancy",
            "pyromancy",
            "geomancy",
            "phytomancy",
            "zoomancy",
            "dreaming",
        ],
    ),
    (
        "Targets",
        &["self-target", "single-target", "burst", "aura"],
    ),
    ("Duration", &["instant", "sustain", "cycles", "permanent"]),
    (
        "Complexity",
        &["low-complexity", "medium-complexity", "high-complexity"],
    ),
    ("Flare", &["low-flare", "medium-flare", "high-flare"]),
    (
        "Effects",
        &[
            "psychic-effect",
            "morale-effect",
            "pervasive",
            "corpus-effect",
            "sundering",
        ],
    ),
    (
        "Focus",
        &[
            "spirit-focus",
            "manipulate-focus",
            "morphic-focus",
            "ego-focus",
            "formulae-focus",
            "banish-focus",
        ],
    ),
    (
        "Conditions",
        &[
            "suffocation",
            "cowed",
            "hallucinating",
            "distracted",
            "dazed",
            "sprawled",
            "immobilized",
        ],
    ),
    (
        "Subjects",
        &[
            "animal",
            "plant",
            "spirit",
            "missile",
            "teleport",
            "grapple",
            "environmental",
            "weather",
            "sensory",
            "wall",
            "memory",
            "combat-boost",
            "reaction",
            "lingering",
        ],
    ),
];

/// One selectable tag in a picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagOption {
    /// The tag id, used as the filter value.
    pub value: String,
    /// `"Name (count)"`.
    pub label: String,
    pub description: Option<String>,
}

impl From<&Tag> for TagOption {
    fn from(tag: &Tag) -> Self {
        Self {
            value: tag.tag.clone(),
            label: tag.label(),
            description: tag.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCategory {
    pub label: String,
    pub options: Vec<TagOption>,
}

/// Groups the loaded tags under the fixed headings.
pub fn categorize(tags: &TagSet) -> Vec<TagCategory> {
    let mut categories = Vec::new();
    let mut placed: HashSet<&str> = HashSet::new();

    for (label, ids) in TAG_CATEGORIES {
        let options: Vec<TagOption> = tags
            .iter()
            .filter(|t| ids.contains(&t.tag.as_str()))
            .map(TagOption::from)
            .collect();
        if options.is_empty() {
            continue;
        }
        placed.extend(ids.iter().copied());
        categories.push(TagCategory {
            label: label.to_string(),
            options,
        });
    }

    let other: Vec<TagOption> = tags
        .iter()
        .filter(|t| !placed.contains(t.tag.as_str()))
        .map(TagOption::from)
        .collect();
    if !other.is_empty() {
        categories.push(TagCategory {
            label: OTHER_CATEGORY.to_string(),
            options: other,
        });
    }

    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::tag;

    fn labels(categories: &[TagCategory]) -> Vec<&str> {
        categories.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn test_categories_follow_table_order() {
        let set = TagSet::new(vec![
            tag("dazed", "Dazed", &[]),
            tag("fire", "Fire", &["Fireball"]),
            tag("aoe", "Area", &["Fireball", "Quake"]),
        ]);
        let categories = categorize(&set);
        assert_eq!(labels(&categories), vec!["Spell Type", "Elements", "Conditions"]);
        assert_eq!(categories[0].options[0].label, "Area (2)");
        assert_eq!(categories[1].options[0].value, "fire");
    }

    #[test]
    fn test_unknown_tags_go_to_other_last() {
        let set = TagSet::new(vec![
            tag("zeta", "Zeta", &[]),
            tag("fire", "Fire", &[]),
            tag("alpha", "Alpha", &[]),
        ]);
        let categories = categorize(&set);
        assert_eq!(labels(&categories), vec!["Elements", "Other"]);
        let other: Vec<_> = categories[1]
            .options
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(other, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_no_other_when_everything_is_known() {
        let set = TagSet::new(vec![tag("fire", "Fire", &[])]);
        assert_eq!(labels(&categorize(&set)), vec!["Elements"]);
    }

    #[test]
    fn test_empty_set_yields_no_categories() {
        assert!(categorize(&TagSet::default()).is_empty());
    }

    #[test]
    fn test_category_ids_are_unique_across_table() {
        let mut seen = HashSet::new();
        for (_, ids) in TAG_CATEGORIES {
            for id in *ids {
                assert!(seen.insert(*id), "duplicate tag id in table: {}", id);
            }
        }
    }
}
