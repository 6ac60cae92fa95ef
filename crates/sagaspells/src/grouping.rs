//! # Grouping
//!
//! Partitions a spell list into named groups for display.
//!
//! - [`GroupingKey::None`]: one group, `"All Spells"`.
//! - [`GroupingKey::Class`] / [`GroupingKey::School`]: one group per distinct value.
//! - [`GroupingKey::Action`]: one group per [`ActionCategory`], see [`classify_action`].
//!
//! Spells inside every group are sorted by name, and groups are sorted by name. Every input
//! spell lands in exactly one group.
//!
//! ## Action Classification
//!
//! Raw action codes look like `"Stndrd (30T)"` or `"4 Prep Pool"`. They are mapped to a
//! coarse category by the ordered rule table [`ACTION_RULES`], matched case-insensitively;
//! the first matching rule wins and anything unmatched is [`ActionCategory::Other`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::model::{sort_by_name, Spell};

pub const ALL_SPELLS_GROUP: &str = "All Spells";
pub const OTHER_GROUP: &str = "Other";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingKey {
    #[default]
    None,
    Class,
    School,
    Action,
}

impl FromStr for GroupingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(GroupingKey::None),
            "class" => Ok(GroupingKey::Class),
            "school" => Ok(GroupingKey::School),
            "action" => Ok(GroupingKey::Action),
            other => Err(format!("unknown grouping key '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionCategory {
    Standard,
    Complex,
    Boost,
    Surge,
    Reaction,
    Prep,
    Narrative,
    Modifier,
    Other,
}

impl ActionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionCategory::Standard => "Standard",
            ActionCategory::Complex => "Complex",
            ActionCategory::Boost => "Boost",
            ActionCategory::Surge => "Surge",
            ActionCategory::Reaction => "Reaction",
            ActionCategory::Prep => "Prep",
            ActionCategory::Narrative => "Narrative",
            ActionCategory::Modifier => "Modifier",
            ActionCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rule tests the lower-cased action string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionMatch {
    StartsWith(&'static str),
    Contains(&'static str),
}

impl ActionMatch {
    fn test(&self, action_lower: &str) -> bool {
        match self {
            ActionMatch::StartsWith(prefix) => action_lower.starts_with(prefix),
            ActionMatch::Contains(needle) => action_lower.contains(needle),
        }
    }
}

/// Evaluated top to bottom; patterns are lower-case.
pub const ACTION_RULES: &[(ActionMatch, ActionCategory)] = &[
    (ActionMatch::StartsWith("stndrd"), ActionCategory::Standard),
    (ActionMatch::StartsWith("cmplx"), ActionCategory::Complex),
    (ActionMatch::StartsWith("boost"), ActionCategory::Boost),
    (ActionMatch::StartsWith("surge"), ActionCategory::Surge),
    (ActionMatch::StartsWith("reaction"), ActionCategory::Reaction),
    (ActionMatch::StartsWith("prep"), ActionCategory::Prep),
    (ActionMatch::Contains("prep pool"), ActionCategory::Prep),
    (ActionMatch::StartsWith("narrative"), ActionCategory::Narrative),
    (ActionMatch::StartsWith("modifier"), ActionCategory::Modifier),
];

pub fn classify_action(action: &str) -> ActionCategory {
    let lower = action.to_lowercase();
    ACTION_RULES
        .iter()
        .find(|(rule, _)| rule.test(&lower))
        .map(|(_, category)| *category)
        .unwrap_or(ActionCategory::Other)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellGroup {
    pub group_name: String,
    pub spells: Vec<Spell>,
}

pub fn group_by(spells: &[Spell], key: GroupingKey) -> Vec<SpellGroup> {
    let group_name = |spell: &Spell| -> String {
        match key {
            GroupingKey::None => ALL_SPELLS_GROUP.to_string(),
            GroupingKey::Class => spell.spell_class.clone(),
            GroupingKey::School => spell.school.clone(),
            GroupingKey::Action => classify_action(&spell.action).to_string(),
        }
    };

    if key == GroupingKey::None {
        let mut all = spells.to_vec();
        sort_by_name(&mut all);
        return vec![SpellGroup {
            group_name: ALL_SPELLS_GROUP.to_string(),
            spells: all,
        }];
    }

    // BTreeMap iteration gives the groups in name order.
    let mut groups: BTreeMap<String, Vec<Spell>> = BTreeMap::new();
    for spell in spells {
        groups.entry(group_name(spell)).or_default().push(spell.clone());
    }

    groups
        .into_iter()
        .map(|(group_name, mut spells)| {
            sort_by_name(&mut spells);
            SpellGroup { group_name, spells }
        })
        .collect()
}

/// Groups by a key given as text, e.g. from a URL or a saved view.
///
/// Unrecognized keys put every spell in a single `"Other"` group.
pub fn group_by_name(spells: &[Spell], key: &str) -> Vec<SpellGroup> {
    match key.parse::<GroupingKey>() {
        Ok(key) => group_by(spells, key),
        Err(_) => {
            tracing::debug!(key, "unknown grouping key, using a single group");
            let mut all = spells.to_vec();
            sort_by_name(&mut all);
            vec![SpellGroup {
                group_name: OTHER_GROUP.to_string(),
                spells: all,
            }]
        }
    }
}
