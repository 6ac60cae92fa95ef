//! Adding and removing single spells.
//!
//! Adding a spell whose name is already a member keeps the existing entry. Both
//! operations are no-ops on unknown ids.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Spell;
use crate::store::{CollectionStore, MemberChange};

pub fn add<S: CollectionStore>(store: &mut S, id: &str, spell: Spell) -> Result<CmdResult> {
    let spell_name = spell.spell_name.clone();
    let change = store.add_spell(id, spell)?;
    Ok(report(change, id, &spell_name))
}

pub fn remove<S: CollectionStore>(store: &mut S, id: &str, spell_name: &str) -> Result<CmdResult> {
    let change = store.remove_spell(id, spell_name)?;
    Ok(report(change, id, spell_name))
}

fn report(change: MemberChange, id: &str, spell_name: &str) -> CmdResult {
    let mut result = CmdResult::default();
    let message = match change {
        MemberChange::Added(book) => {
            let message = CmdMessage::success(format!("Added {} to {}", spell_name, book.name));
            result.affected_spellbooks.push(book);
            message
        }
        MemberChange::Removed(book) => {
            let message =
                CmdMessage::success(format!("Removed {} from {}", spell_name, book.name));
            result.affected_spellbooks.push(book);
            message
        }
        MemberChange::AlreadyPresent => {
            CmdMessage::info(format!("{} is already in this spellbook", spell_name))
        }
        MemberChange::NotPresent => {
            CmdMessage::info(format!("{} is not in this spellbook", spell_name))
        }
        MemberChange::SpellbookNotFound => {
            CmdMessage::info(format!("No spellbook with id {}", id))
        }
    };
    result.add_message(message);
    result
}
