use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SpellbookDraft;
use crate::store::CollectionStore;

pub fn run<S: CollectionStore>(store: &mut S, draft: SpellbookDraft) -> Result<CmdResult> {
    let book = store.create(draft)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Spellbook created: {} ({})",
        book.name, book.character
    )));
    result.affected_spellbooks.push(book);
    Ok(result)
}
