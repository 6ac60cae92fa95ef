//! Builders for spells, tags and stores used across the test suites.

use crate::model::Spell;
use crate::tags::Tag;

pub use crate::store::memory::fixtures::StoreFixture;

pub struct SpellFixture {
    spell: Spell,
}

impl SpellFixture {
    pub fn new(name: &str) -> Self {
        Self {
            spell: Spell {
                spell_name: name.to_string(),
                spell_class: "Elementalism".to_string(),
                school: "Pyromancy".to_string(),
                complexity: 1,
                flare: 0,
                range: "Self".to_string(),
                target: "Single".to_string(),
                action: "Stndrd (30T)".to_string(),
                duration: "Instant".to_string(),
                check: "Int".to_string(),
                skill: "Arcana".to_string(),
                focus: "Wand".to_string(),
                spell_type: "Utility".to_string(),
                keywords: None,
                description: Some(format!("The {} spell.", name)),
                alt_description: None,
            },
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        self.spell.spell_class = class.to_string();
        self
    }

    pub fn school(mut self, school: &str) -> Self {
        self.spell.school = school.to_string();
        self
    }

    pub fn complexity(mut self, complexity: i64) -> Self {
        self.spell.complexity = complexity;
        self
    }

    pub fn action(mut self, action: &str) -> Self {
        self.spell.action = action.to_string();
        self
    }

    pub fn description(mut self, description: Option<&str>) -> Self {
        self.spell.description = description.map(str::to_string);
        self
    }

    pub fn build(self) -> Spell {
        self.spell
    }
}

pub fn spell(name: &str) -> Spell {
    SpellFixture::new(name).build()
}

pub fn tag(id: &str, name: &str, matches: &[&str]) -> Tag {
    Tag {
        tag: id.to_string(),
        name: name.to_string(),
        description: None,
        matches: matches.iter().map(|m| m.to_string()).collect(),
    }
}

/// Five spells across three classes and five schools, sorted by name.
pub fn five_spells() -> Vec<Spell> {
    vec![
        SpellFixture::new("Beast Speech")
            .class("Animism")
            .school("Zoomancy")
            .complexity(1)
            .description(Some("Talk with animals."))
            .action("Narrative")
            .build(),
        SpellFixture::new("Ember Lance")
            .class("Elementalism")
            .school("Pyromancy")
            .complexity(3)
            .description(Some("A lance of FIRE pierces the target."))
            .action("Stndrd (30T)")
            .build(),
        SpellFixture::new("Glacial Wall")
            .class("Elementalism")
            .school("Hydromancy")
            .complexity(4)
            .description(Some("Raises a wall of ice."))
            .action("Cmplx (45T)")
            .build(),
        SpellFixture::new("Mind Spike")
            .class("Sorcery")
            .school("Dreaming")
            .complexity(2)
            .description(Some("Drives a psychic spike into a mind."))
            .action("Reaction (G+15T)")
            .build(),
        SpellFixture::new("Tremor")
            .class("Sorcery")
            .school("Geomancy")
            .complexity(5)
            .description(Some("Shakes the earth."))
            .action("Surge (1RP)")
            .build(),
    ]
}
