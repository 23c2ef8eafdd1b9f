use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::page_store::PageStore;
use crate::store::StorageBackend;

use super::helpers::listed;

pub fn run<B: StorageBackend>(store: &PageStore<B>, term: &str) -> Result<CmdResult> {
    let matches = store.snapshot().search(term);
    let mut result = CmdResult::default();
    if matches.is_empty() {
        result.add_message(CmdMessage::info(format!("No pages match \"{}\"", term)));
    }
    Ok(result.with_listed_pages(listed(store, matches)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewPage;
    use crate::store::mem_backend::MemBackend;
    use crate::store::PersistenceAdapter;

    #[test]
    fn ranks_exact_title_matches_first() {
        let adapter = PersistenceAdapter::new(MemBackend::new());
        adapter.create_page(NewPage::new("1", "Foo Bar"));
        adapter.create_page(NewPage::new("2", "Bar"));
        adapter.create_page(NewPage::new("3", "Another").tags(vec!["bar-stuff".into()]));
        let store = PageStore::open(adapter);

        let result = run(&store, "Bar").unwrap();
        let titles: Vec<&str> = result
            .listed_pages
            .iter()
            .map(|row| row.page.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Bar", "Foo Bar", "Another"]);
    }
}
