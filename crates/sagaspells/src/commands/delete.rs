use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::CollectionStore;

/// Deletes permanently. There is no trash to restore from.
pub fn run<S: CollectionStore>(store: &mut S, id: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.delete(id)? {
        Some(book) => {
            result.add_message(CmdMessage::success(format!(
                "Spellbook deleted: {}",
                book.name
            )));
            result.affected_spellbooks.push(book);
        }
        None => result.add_message(CmdMessage::info(format!("No spellbook with id {}", id))),
    }
    Ok(result)
}
