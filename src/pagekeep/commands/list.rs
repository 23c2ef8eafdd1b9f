use crate::commands::{CmdMessage, CmdResult, ListedPage};
use crate::error::Result;
use crate::model::Page;
use crate::page_store::{PageSnapshot, PageStore};
use crate::store::StorageBackend;

use super::helpers::listed;

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub tag: Option<String>,
    pub favorites_only: bool,
}

/// Flat listing in collection order.
pub fn run<B: StorageBackend>(store: &PageStore<B>, filter: &ListFilter) -> Result<CmdResult> {
    let snapshot = store.snapshot();
    let pages: Vec<&Page> = snapshot
        .pages
        .iter()
        .filter(|p| filter.tag.as_deref().map_or(true, |tag| p.has_tag(tag)))
        .filter(|p| !filter.favorites_only || p.is_favorite())
        .collect();

    let mut result = CmdResult::default();
    if pages.is_empty() {
        result.add_message(CmdMessage::info("No pages match"));
    }
    Ok(result.with_listed_pages(listed(store, pages)))
}

/// Depth-first listing of the page hierarchy, children under their parent.
pub fn tree<B: StorageBackend>(store: &PageStore<B>) -> Result<CmdResult> {
    let snapshot = store.snapshot();
    let current = store.current_page_id();
    let mut rows = Vec::with_capacity(snapshot.pages.len());
    for root in snapshot.root_pages() {
        walk(snapshot, root, 0, current, &mut rows);
    }
    Ok(CmdResult::default().with_listed_pages(rows))
}

fn walk(
    snapshot: &PageSnapshot,
    page: &Page,
    depth: usize,
    current: Option<&str>,
    rows: &mut Vec<ListedPage>,
) {
    // Stored data may contain a cycle; never emit a page twice.
    if rows.iter().any(|row| row.page.id == page.id) {
        return;
    }
    rows.push(ListedPage {
        page: page.clone(),
        depth,
        is_current: current == Some(page.id.as_str()),
    });
    for child in snapshot.children_of(&page.id) {
        walk(snapshot, child, depth + 1, current, rows);
    }
}
