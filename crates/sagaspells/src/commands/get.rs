use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::CollectionStore;

/// Looks up one spellbook. An unknown id lists nothing and says so.
pub fn run<S: CollectionStore>(store: &S, id: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.get(id)? {
        Some(book) => result.listed_spellbooks.push(book),
        None => result.add_message(CmdMessage::info(format!("No spellbook with id {}", id))),
    }
    Ok(result)
}

/// Lists every spellbook, by name when `sorted`, otherwise in creation order.
pub fn list<S: CollectionStore>(store: &S, sorted: bool) -> Result<CmdResult> {
    let books = if sorted {
        store.list_sorted()?
    } else {
        store.list()?
    };

    let mut result = CmdResult::default();
    if books.is_empty() {
        result.add_message(CmdMessage::info("No spellbooks yet."));
    }
    Ok(result.with_listed_spellbooks(books))
}
