//! # API Facade
//!
//! A thin layer over the command modules and the single entry point for
//! every pagekeep operation, whatever the UI.
//!
//! The facade:
//! - **dispatches** to the matching `commands::*` function,
//! - **normalizes inputs** (selectors, optional arguments),
//! - **returns structured types** (`Result<CmdResult>`).
//!
//! It holds no business logic and does no I/O of its own: printing belongs to
//! the CLI, rules belong to the commands and the page store.
//!
//! `PagekeepApi<B: StorageBackend>` is generic over the storage backend, so
//! production code runs on `FsBackend` and tests on `MemBackend`.

use crate::commands;
use crate::error::Result;
use crate::page_store::PageStore;
use crate::store::{PersistenceAdapter, StorageBackend};
use std::path::{Path, PathBuf};

pub use crate::commands::config::ConfigAction;
pub use crate::commands::create::CreateOptions;
pub use crate::commands::export::ExportFormat;
pub use crate::commands::list::ListFilter;
pub use crate::commands::update::PageChange;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

pub struct PagekeepApi<B: StorageBackend> {
    store: PageStore<B>,
    data_dir: PathBuf,
}

impl<B: StorageBackend> PagekeepApi<B> {
    /// Opens the page store on `backend`. `data_dir` is where the config
    /// file lives.
    pub fn new(backend: B, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: PageStore::open(PersistenceAdapter::new(backend)),
            data_dir: data_dir.into(),
        }
    }

    pub fn store(&self) -> &PageStore<B> {
        &self.store
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Gives up the facade, for clients that share the store with the
    /// editor bridge.
    pub fn into_store(self) -> PageStore<B> {
        self.store
    }

    pub fn create_page(&mut self, title: String, options: CreateOptions) -> Result<CmdResult> {
        commands::create::run(&mut self.store, title, options)
    }

    pub fn list_pages(&self, filter: &ListFilter) -> Result<CmdResult> {
        commands::list::run(&self.store, filter)
    }

    pub fn page_tree(&self) -> Result<CmdResult> {
        commands::list::tree(&self.store)
    }

    pub fn view_page(&self, selector: Option<&str>) -> Result<CmdResult> {
        commands::view::run(&self.store, selector)
    }

    pub fn update_page(&mut self, selector: &str, change: PageChange) -> Result<CmdResult> {
        commands::update::run(&mut self.store, selector, change)
    }

    pub fn delete_pages<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors: Vec<String> = selectors.iter().map(|s| s.as_ref().to_string()).collect();
        commands::delete::run(&mut self.store, &selectors)
    }

    pub fn select_page(&mut self, selector: Option<&str>) -> Result<CmdResult> {
        commands::select::run(&mut self.store, selector)
    }

    pub fn toggle_favorite(&mut self, selector: &str) -> Result<CmdResult> {
        commands::favorite::toggle(&mut self.store, selector)
    }

    pub fn favorites(&self) -> Result<CmdResult> {
        commands::favorite::list(&self.store)
    }

    pub fn search(&self, term: &str) -> Result<CmdResult> {
        commands::search::run(&self.store, term)
    }

    pub fn recent(&self) -> Result<CmdResult> {
        commands::recent::run(&self.store)
    }

    pub fn templates(&self) -> Result<CmdResult> {
        commands::templates::run()
    }

    pub fn sidebar(&mut self, open: Option<bool>) -> Result<CmdResult> {
        commands::sidebar::run(&mut self.store, open)
    }

    pub fn export_page(&self, selector: &str, format: ExportFormat) -> Result<CmdResult> {
        commands::export::run(&self.store, selector, format)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn api() -> PagekeepApi<MemBackend> {
        PagekeepApi::new(MemBackend::new(), "/nonexistent")
    }

    #[test]
    fn fresh_api_is_seeded() {
        let api = api();
        let result = api.list_pages(&ListFilter::default()).unwrap();
        assert_eq!(result.listed_pages.len(), 8);
        assert_eq!(result.listed_pages[0].page.title, "Getting Started");
    }

    #[test]
    fn create_then_select_by_title() {
        let mut api = api();
        api.create_page("Scratch".into(), CreateOptions::default()).unwrap();
        api.select_page(Some("getting started")).unwrap();
        assert_eq!(api.store().current_page_id(), Some("1"));
    }

    #[test]
    fn delete_accepts_str_selectors() {
        let mut api = api();
        let result = api.delete_pages(&["1", "Goals"]).unwrap();
        assert_eq!(result.affected_pages.len(), 2);
        assert_eq!(api.store().pages().len(), 6);
    }
}
