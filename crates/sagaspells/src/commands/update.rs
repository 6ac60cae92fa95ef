use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SpellbookPatch;
use crate::store::CollectionStore;

pub fn run<S: CollectionStore>(
    store: &mut S,
    id: &str,
    patch: SpellbookPatch,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.update(id, patch)? {
        Some(book) => {
            result.add_message(CmdMessage::success(format!(
                "Spellbook updated: {}",
                book.name
            )));
            result.affected_spellbooks.push(book);
        }
        None => result.add_message(CmdMessage::info(format!("No spellbook with id {}", id))),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{spell, StoreFixture};

    #[test]
    fn renames_and_keeps_other_fields() {
        let mut fixture = StoreFixture::new().with_spellbook("Fire", "Mage", vec![spell("Burn")]);
        let before = fixture.find("Fire");

        let result = run(
            &mut fixture.store,
            &before.id,
            SpellbookPatch::default().name("Inferno").character("Pyromancer"),
        )
        .unwrap();

        let after = &result.affected_spellbooks[0];
        assert_eq!(after.name, "Inferno");
        assert_eq!(after.character, "Pyromancer");
        assert_eq!(after.spell_names(), vec!["Burn"]);
        assert!(after.updated_at > before.updated_at);
    }

    #[test]
    fn empty_patch_still_touches() {
        let mut fixture = StoreFixture::new().with_spellbook("Fire", "Mage", vec![]);
        let before = fixture.find("Fire");
        let result = run(&mut fixture.store, &before.id, SpellbookPatch::default()).unwrap();
        assert!(result.affected_spellbooks[0].updated_at > before.updated_at);
    }

    #[test]
    fn unknown_id_is_a_noop() {
        let mut fixture = StoreFixture::new().with_spellbooks(1);
        let before = fixture.store.list().unwrap();
        let result = run(
            &mut fixture.store,
            "missing",
            SpellbookPatch::default().name("X"),
        )
        .unwrap();
        assert!(!result.changed());
        assert_eq!(fixture.store.list().unwrap(), before);
    }
}
