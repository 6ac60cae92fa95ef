//! The catalog view: filter, then group.

use crate::catalog::Library;
use crate::commands::{CmdMessage, CmdResult};
use crate::filter::{apply_filters, FilterSpec};
use crate::grouping::{group_by, GroupingKey};

/// `"1 spell"`, `"0 spells"`, `"12 spells"`.
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 spell".to_string()
    } else {
        format!("{} spells", count)
    }
}

/// Filters the catalog and groups what is left. The first message is the count label.
pub fn run(library: &Library, spec: &FilterSpec, key: GroupingKey) -> CmdResult {
    let matching = apply_filters(library.catalog.spells(), spec, &library.tags);
    tracing::debug!(
        total = library.catalog.len(),
        matching = matching.len(),
        ?key,
        "browsing catalog"
    );

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(count_label(matching.len())));
    if matching.is_empty() && spec.is_active() {
        result.add_message(CmdMessage::info("No spells match the current filters."));
    }
    result.groups = group_by(&matching, key);
    result
}
