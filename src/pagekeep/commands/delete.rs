use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::page_store::PageStore;
use crate::store::StorageBackend;

use super::helpers::resolve_pages;

/// Deletes the given pages. Children of a deleted page are kept and show up
/// at the top level.
pub fn run<B: StorageBackend>(store: &mut PageStore<B>, selectors: &[String]) -> Result<CmdResult> {
    let pages = resolve_pages(store, selectors)?;
    let mut result = CmdResult::default();

    for page in pages {
        if store.delete(&page.id) {
            result.add_message(CmdMessage::success(format!(
                "Page deleted: {}",
                page.display_title()
            )));
            result.affected_pages.push(page);
        } else {
            result.add_message(CmdMessage::warning(format!(
                "Page already gone: {}",
                page.title
            )));
        }
    }

    if let Some(current) = store.current_page() {
        if !result.affected_pages.is_empty() {
            result.add_message(CmdMessage::info(format!("Now on: {}", current.title)));
        }
    }
    Ok(result)
}
