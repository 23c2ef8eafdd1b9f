use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PagekeepError, Result};
use crate::model::PageUpdate;
use crate::page_store::PageStore;
use crate::store::StorageBackend;

use super::helpers::resolve_page;

/// A single field change, addressed by page id or title.
#[derive(Debug, Clone)]
pub enum PageChange {
    Rename(String),
    Icon(Option<String>),
    /// New parent selector, `None` moves the page to the top level.
    Move(Option<String>),
    Tags(Vec<String>),
}

pub fn run<B: StorageBackend>(
    store: &mut PageStore<B>,
    selector: &str,
    change: PageChange,
) -> Result<CmdResult> {
    let target = resolve_page(store, selector)?;

    let (update, message) = match change {
        PageChange::Rename(title) => {
            let message = format!("Renamed \"{}\" to \"{}\"", target.title, title.trim());
            (PageUpdate::title(title.trim()), message)
        }
        PageChange::Icon(icon) => {
            let icon = icon.filter(|i| !i.trim().is_empty());
            let message = match &icon {
                Some(icon) => format!("Icon of {} set to {}", target.title, icon),
                None => format!("Icon of {} removed", target.title),
            };
            (PageUpdate::icon(icon), message)
        }
        PageChange::Move(parent) => {
            let parent = parent
                .map(|selector| resolve_page(store, &selector))
                .transpose()?;
            let message = match &parent {
                Some(parent) => format!("Moved {} under {}", target.title, parent.title),
                None => format!("Moved {} to the top level", target.title),
            };
            (PageUpdate::parent(parent.map(|p| p.id)), message)
        }
        PageChange::Tags(tags) => {
            let tags: Vec<String> = tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            let message = if tags.is_empty() {
                format!("Tags of {} cleared", target.title)
            } else {
                format!("Tags of {} set to {}", target.title, tags.join(", "))
            };
            let tags = (!tags.is_empty()).then_some(tags);
            (PageUpdate::tags(tags), message)
        }
    };

    let page = store
        .update(&target.id, update)?
        .ok_or_else(|| PagekeepError::PageNotFound(target.id.clone()))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(message));
    Ok(result.with_affected_pages(vec![page]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewPage;
    use crate::store::mem_backend::MemBackend;
    use crate::store::PersistenceAdapter;

    fn store() -> PageStore<MemBackend> {
        let adapter = PersistenceAdapter::new(MemBackend::new());
        adapter.create_page(NewPage::new("p", "Parent"));
        adapter.create_page(NewPage::new("c", "Child").parent("p"));
        PageStore::open(adapter)
    }

    #[test]
    fn rename_trims_and_persists() {
        let mut store = store();
        run(&mut store, "c", PageChange::Rename("  Kid ".into())).unwrap();
        assert_eq!(store.adapter().get_page("c").unwrap().title, "Kid");
    }

    #[test]
    fn empty_icon_removes_it() {
        let mut store = store();
        run(&mut store, "c", PageChange::Icon(Some("🌱".into()))).unwrap();
        assert_eq!(store.page("c").unwrap().icon.as_deref(), Some("🌱"));
        run(&mut store, "c", PageChange::Icon(Some(" ".into()))).unwrap();
        assert_eq!(store.page("c").unwrap().icon, None);
    }

    #[test]
    fn move_to_top_level_and_back() {
        let mut store = store();
        run(&mut store, "Child", PageChange::Move(None)).unwrap();
        assert_eq!(store.page("c").unwrap().parent_id, None);
        run(&mut store, "Child", PageChange::Move(Some("Parent".into()))).unwrap();
        assert_eq!(store.page("c").unwrap().parent_id.as_deref(), Some("p"));
    }

    #[test]
    fn moving_under_a_descendant_is_rejected() {
        let mut store = store();
        let result = run(&mut store, "p", PageChange::Move(Some("c".into())));
        assert!(matches!(result, Err(PagekeepError::CyclicParent { .. })));
        assert_eq!(store.page("p").unwrap().parent_id, None);
    }

    #[test]
    fn empty_tag_list_clears_tags() {
        let mut store = store();
        run(&mut store, "p", PageChange::Tags(vec!["work".into(), " ".into()])).unwrap();
        assert_eq!(store.page("p").unwrap().tags, Some(vec!["work".to_string()]));
        run(&mut store, "p", PageChange::Tags(Vec::new())).unwrap();
        assert_eq!(store.page("p").unwrap().tags, None);
    }
}
