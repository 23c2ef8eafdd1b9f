use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Page;
use crate::page_store::PageStore;
use crate::render;
use crate::store::StorageBackend;

use super::helpers::resolve_page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Markdown,
    Html,
    Json,
}

pub fn run<B: StorageBackend>(
    store: &PageStore<B>,
    selector: &str,
    format: ExportFormat,
) -> Result<CmdResult> {
    let page = resolve_page(store, selector)?;
    let output = match format {
        ExportFormat::Markdown => markdown(&page)?,
        ExportFormat::Html => render::to_html(&page.content),
        ExportFormat::Json => serde_json::to_string_pretty(&page)?,
    };
    Ok(CmdResult::default()
        .with_affected_pages(vec![page])
        .with_output(output))
}

/// Page body as markdown, led by the title unless the body already opens
/// with it.
fn markdown(page: &Page) -> Result<String> {
    let body = render::to_markdown(&page.content)?;
    let opens_with_title = page
        .content
        .children()
        .first()
        .is_some_and(|first| first.kind() == "heading" && first.plain_text() == page.title);
    if opens_with_title {
        Ok(body)
    } else if body.is_empty() {
        Ok(format!("# {}\n", page.title))
    } else {
        Ok(format!("# {}\n\n{}", page.title, body))
    }
}
