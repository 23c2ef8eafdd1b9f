use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NewPage;
use crate::page_store::PageStore;
use crate::store::StorageBackend;

use super::helpers::resolve_page;

#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub icon: Option<String>,
    /// Parent page id or title.
    pub parent: Option<String>,
    pub template: Option<String>,
    pub tags: Vec<String>,
}

pub fn run<B: StorageBackend>(
    store: &mut PageStore<B>,
    title: String,
    options: CreateOptions,
) -> Result<CmdResult> {
    let mut new_page = NewPage::with_generated_id(title);
    if let Some(icon) = options.icon {
        new_page = new_page.icon(icon);
    }
    if let Some(parent) = &options.parent {
        new_page = new_page.parent(resolve_page(store, parent)?.id);
    }
    if !options.tags.is_empty() {
        new_page = new_page.tags(options.tags);
    }

    let page = match &options.template {
        Some(template) => store.create_from_template(template, new_page)?,
        None => store.create(new_page)?,
    };

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Page created: {}",
        page.display_title()
    )));
    Ok(result.with_affected_pages(vec![page]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PagekeepError;
    use crate::store::mem_backend::MemBackend;
    use crate::store::PersistenceAdapter;

    fn store() -> PageStore<MemBackend> {
        let adapter = PersistenceAdapter::new(MemBackend::new());
        adapter.create_page(NewPage::new("root", "Root"));
        PageStore::open(adapter)
    }

    #[test]
    fn creates_and_selects_the_page() {
        let mut store = store();
        let result = run(&mut store, "Ideas".into(), CreateOptions::default()).unwrap();
        let page = &result.affected_pages[0];
        assert_eq!(page.title, "Ideas");
        assert!(!page.id.is_empty());
        assert_eq!(store.current_page_id(), Some(page.id.as_str()));
    }

    #[test]
    fn parent_is_resolved_by_title() {
        let mut store = store();
        let options = CreateOptions {
            parent: Some("root".into()),
            ..CreateOptions::default()
        };
        let result = run(&mut store, "Child".into(), options).unwrap();
        assert_eq!(result.affected_pages[0].parent_id.as_deref(), Some("root"));
    }

    #[test]
    fn template_supplies_content_and_icon() {
        let mut store = store();
        let options = CreateOptions {
            template: Some("meeting-notes".into()),
            ..CreateOptions::default()
        };
        let result = run(&mut store, "Standup".into(), options).unwrap();
        let page = &result.affected_pages[0];
        assert_eq!(page.icon.as_deref(), Some("📝"));
        assert_eq!(page.content.headings()[0].text, "Meeting Notes");
    }

    #[test]
    fn unknown_template_is_an_error() {
        let mut store = store();
        let options = CreateOptions {
            template: Some("nope".into()),
            ..CreateOptions::default()
        };
        assert!(matches!(
            run(&mut store, "X".into(), options),
            Err(PagekeepError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut store = store();
        assert!(matches!(
            run(&mut store, "  ".into(), CreateOptions::default()),
            Err(PagekeepError::InvalidTitle)
        ));
    }
}
