use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::page_store::PageStore;
use crate::store::StorageBackend;

/// Sets the sidebar flag, or flips it when `open` is `None`.
pub fn run<B: StorageBackend>(store: &mut PageStore<B>, open: Option<bool>) -> Result<CmdResult> {
    let open = match open {
        Some(open) => {
            store.set_sidebar_open(open);
            open
        }
        None => store.toggle_sidebar(),
    };
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(if open {
        "Sidebar open"
    } else {
        "Sidebar closed"
    }));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewPage;
    use crate::store::mem_backend::MemBackend;
    use crate::store::PersistenceAdapter;

    #[test]
    fn toggles_and_sets() {
        let adapter = PersistenceAdapter::new(MemBackend::new());
        adapter.create_page(NewPage::new("a", "A"));
        let mut store = PageStore::open(adapter);
        assert!(store.sidebar_open());

        run(&mut store, None).unwrap();
        assert!(!store.adapter().sidebar_open());
        run(&mut store, Some(true)).unwrap();
        assert!(store.adapter().sidebar_open());
    }
}
