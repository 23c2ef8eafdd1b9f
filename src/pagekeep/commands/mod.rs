//! # Commands
//!
//! One module per user-facing operation. Every command takes the
//! [`PageStore`](crate::page_store::PageStore), does its work, and returns a
//! [`CmdResult`] describing what happened. Commands never print; the CLI layer
//! turns results into output.

use crate::config::AppConfig;
use crate::model::Page;
use crate::templates::PageTemplate;

pub mod config;
pub mod create;
pub mod delete;
pub mod export;
pub mod favorite;
pub mod helpers;
pub mod list;
pub mod recent;
pub mod search;
pub mod select;
pub mod sidebar;
pub mod templates;
pub mod update;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A page as shown in a listing.
#[derive(Debug, Clone)]
pub struct ListedPage {
    pub page: Page,
    /// Nesting level in tree listings, 0 for flat listings.
    pub depth: usize,
    pub is_current: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_pages: Vec<Page>,
    pub listed_pages: Vec<ListedPage>,
    /// Breadcrumb path of the single page a command showed, root first.
    pub breadcrumbs: Vec<Page>,
    pub templates: Vec<PageTemplate>,
    /// Rendered output for commands that produce a document.
    pub output: Option<String>,
    pub config: Option<AppConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_pages(mut self, pages: Vec<Page>) -> Self {
        self.affected_pages = pages;
        self
    }

    pub fn with_listed_pages(mut self, pages: Vec<ListedPage>) -> Self {
        self.listed_pages = pages;
        self
    }

    pub fn with_output(mut self, output: String) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }
}
