use crate::commands::{CmdResult, ListedPage};
use crate::error::{PagekeepError, Result};
use crate::page_store::PageStore;
use crate::render;
use crate::store::StorageBackend;

use super::helpers::resolve_page;

/// Shows one page: the page itself, its breadcrumb path, its children and
/// its body as markdown. Without a selector the current page is shown.
pub fn run<B: StorageBackend>(store: &PageStore<B>, selector: Option<&str>) -> Result<CmdResult> {
    let page = match selector {
        Some(selector) => resolve_page(store, selector)?,
        None => store
            .current_page()
            .cloned()
            .ok_or_else(|| PagekeepError::Api("No page selected".to_string()))?,
    };

    let snapshot = store.snapshot();
    let breadcrumbs = snapshot.ancestors(&page.id).into_iter().cloned().collect();
    let children = snapshot
        .children_of(&page.id)
        .into_iter()
        .map(|child| ListedPage {
            page: child.clone(),
            depth: 1,
            is_current: false,
        })
        .collect();
    let body = render::to_markdown(&page.content)?;

    let mut result = CmdResult::default()
        .with_affected_pages(vec![page])
        .with_listed_pages(children)
        .with_output(body);
    result.breadcrumbs = breadcrumbs;
    Ok(result)
}
