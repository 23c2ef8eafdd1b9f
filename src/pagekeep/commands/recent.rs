use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::page_store::PageStore;
use crate::store::StorageBackend;

use super::helpers::listed;

/// Recently visited pages, most recent first. Visits to deleted pages are
/// skipped.
pub fn run<B: StorageBackend>(store: &PageStore<B>) -> Result<CmdResult> {
    let pages = store.recent_pages();
    let mut result = CmdResult::default();
    if pages.is_empty() {
        result.add_message(CmdMessage::info("No recent pages"));
    }
    Ok(result.with_listed_pages(listed(store, pages)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewPage;
    use crate::store::mem_backend::MemBackend;
    use crate::store::PersistenceAdapter;

    #[test]
    fn lists_visits_newest_first_without_deleted_pages() {
        let adapter = PersistenceAdapter::new(MemBackend::new());
        for id in ["a", "b", "c"] {
            adapter.create_page(NewPage::new(id, id));
        }
        let mut store = PageStore::open(adapter);
        store.select(Some("a"));
        store.select(Some("b"));
        store.select(Some("c"));
        store.select(Some("a"));
        store.delete("c");

        let ids: Vec<String> = run(&store)
            .unwrap()
            .listed_pages
            .into_iter()
            .map(|row| row.page.id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
