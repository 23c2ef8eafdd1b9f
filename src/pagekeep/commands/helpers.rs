use crate::commands::ListedPage;
use crate::error::{PagekeepError, Result};
use crate::model::Page;
use crate::page_store::PageStore;
use crate::store::StorageBackend;

/// Finds a page by id, or failing that by case-insensitive title.
pub fn resolve_page<B: StorageBackend>(store: &PageStore<B>, selector: &str) -> Result<Page> {
    if let Some(page) = store.page(selector) {
        return Ok(page.clone());
    }

    let wanted = selector.trim().to_lowercase();
    let mut matches = store
        .pages()
        .iter()
        .filter(|p| p.title.to_lowercase() == wanted);
    match (matches.next(), matches.next()) {
        (Some(page), None) => Ok(page.clone()),
        (Some(_), Some(_)) => Err(PagekeepError::AmbiguousSelector(selector.to_string())),
        _ => Err(PagekeepError::PageNotFound(selector.to_string())),
    }
}

pub fn resolve_pages<B: StorageBackend>(
    store: &PageStore<B>,
    selectors: &[String],
) -> Result<Vec<Page>> {
    selectors.iter().map(|s| resolve_page(store, s)).collect()
}

pub fn listed<B: StorageBackend>(store: &PageStore<B>, pages: Vec<&Page>) -> Vec<ListedPage> {
    let current = store.current_page_id();
    pages
        .into_iter()
        .map(|page| ListedPage {
            is_current: current == Some(page.id.as_str()),
            page: page.clone(),
            depth: 0,
        })
        .collect()
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
        adapter.create_page(NewPage::new("b", "Notes"));
        adapter.create_page(NewPage::new("c", "notes"));
        PageStore::open(adapter)
    }

    #[test]
    fn resolves_by_id_then_title() {
        let store = store();
        assert_eq!(resolve_page(&store, "a").unwrap().title, "Alpha");
        assert_eq!(resolve_page(&store, "alpha").unwrap().id, "a");
    }

    #[test]
    fn duplicate_titles_are_ambiguous() {
        let store = store();
        assert!(matches!(
            resolve_page(&store, "Notes"),
            Err(PagekeepError::AmbiguousSelector(_))
        ));
        assert_eq!(resolve_page(&store, "c").unwrap().title, "notes");
    }

    #[test]
    fn unknown_selector_is_not_found() {
        let store = store();
        assert!(matches!(
            resolve_page(&store, "zzz"),
            Err(PagekeepError::PageNotFound(_))
        ));
    }
}
