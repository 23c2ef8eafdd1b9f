use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PagekeepError, Result};
use crate::page_store::PageStore;
use crate::store::StorageBackend;

use super::helpers::{listed, resolve_page};

pub fn toggle<B: StorageBackend>(store: &mut PageStore<B>, selector: &str) -> Result<CmdResult> {
    let page = resolve_page(store, selector)?;
    let now_favorite = store
        .toggle_favorite(&page.id)
        .ok_or_else(|| PagekeepError::PageNotFound(page.id.clone()))?;

    let mut result = CmdResult::default();
    let verb = if now_favorite { "Added to" } else { "Removed from" };
    result.add_message(CmdMessage::success(format!(
        "{} favorites: {}",
        verb,
        page.display_title()
    )));
    let updated = store.page(&page.id).cloned().unwrap_or(page);
    Ok(result.with_affected_pages(vec![updated]))
}

pub fn list<B: StorageBackend>(store: &PageStore<B>) -> Result<CmdResult> {
    let favorites = store.snapshot().favorites();
    let mut result = CmdResult::default();
    if favorites.is_empty() {
        result.add_message(CmdMessage::info("No favorites yet"));
    }
    Ok(result.with_listed_pages(listed(store, favorites)))
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
    fn toggle_twice_restores_state() {
        let mut store = store();
        let first = toggle(&mut store, "a").unwrap();
        assert!(first.affected_pages[0].is_favorite());
        assert_eq!(list(&store).unwrap().listed_pages.len(), 1);

        toggle(&mut store, "a").unwrap();
        assert!(!store.page("a").unwrap().is_favorite());
        assert!(list(&store).unwrap().listed_pages.is_empty());
    }
}
