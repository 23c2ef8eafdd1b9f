use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::page_store::PageStore;
use crate::store::StorageBackend;

use super::helpers::resolve_page;

/// Selects a page, or clears the selection when `selector` is `None`.
pub fn run<B: StorageBackend>(store: &mut PageStore<B>, selector: Option<&str>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match selector {
        Some(selector) => {
            let page = resolve_page(store, selector)?;
            store.select(Some(&page.id));
            result.add_message(CmdMessage::success(format!(
                "Selected: {}",
                page.display_title()
            )));
            Ok(result.with_affected_pages(vec![page]))
        }
        None => {
            store.select(None);
            result.add_message(CmdMessage::info("Selection cleared"));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewPage;
    use crate::store::mem_backend::MemBackend;
    use crate::store::PersistenceAdapter;

    fn store() -> PageStore<MemBackend> {
        let adapter = PersistenceAdapter::new(MemBackend::new());
        adapter.create_page(NewPage::new("a", "Alpha"));
        adapter.create_page(NewPage::new("b", "Beta"));
        PageStore::open(adapter)
    }

    #[test]
    fn selection_is_persisted_and_logged() {
        let mut store = store();
        run(&mut store, Some("beta")).unwrap();
        assert_eq!(store.adapter().current_page_id().as_deref(), Some("b"));
        assert_eq!(store.recent_pages()[0].id, "b");
    }

    #[test]
    fn clearing_removes_the_selection() {
        let mut store = store();
        run(&mut store, None).unwrap();
        assert_eq!(store.current_page_id(), None);
        assert_eq!(store.adapter().current_page_id(), None);
    }
}
