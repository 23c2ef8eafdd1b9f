//! # Page Store
//!
//! The in-memory source of truth for the page collection, the current
//! selection and the sidebar flag.
//!
//! Every mutation follows the same sequence:
//! 1. validate,
//! 2. write through the [`PersistenceAdapter`] (synchronous, durable on return),
//! 3. re-read the affected state from the adapter,
//! 4. publish a fresh [`PageSnapshot`] to subscribers.
//!
//! A subscriber that observes a snapshot after a mutation therefore always sees
//! the persisted post-mutation state. Subscribers receive snapshots through a
//! `tokio::sync::watch` channel; publishing does not need a runtime.
//!
//! Mutations take `&mut self`. Callers that share the store across tasks wrap
//! it in a [`SharedPageStore`] so all writes go through one lock.

use crate::document::DocNode;
use crate::error::{PagekeepError, Result};
use crate::model::{NewPage, Page, PageUpdate};
use crate::store::{PersistenceAdapter, StorageBackend};
use crate::templates;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

pub type SharedPageStore<B> = Arc<Mutex<PageStore<B>>>;

/// Immutable view of the store's state, plus the derived views the UI reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSnapshot {
    pub pages: Vec<Page>,
    pub current_page_id: Option<String>,
    pub sidebar_open: bool,
}

impl PageSnapshot {
    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.current_page_id.as_deref().and_then(|id| self.page(id))
    }

    /// Pages without a parent. Pages whose parent no longer exists are
    /// treated as roots so they stay reachable.
    pub fn root_pages(&self) -> Vec<&Page> {
        self.pages
            .iter()
            .filter(|p| match &p.parent_id {
                None => true,
                Some(parent) => self.page(parent).is_none(),
            })
            .collect()
    }

    pub fn children_of(&self, id: &str) -> Vec<&Page> {
        self.pages
            .iter()
            .filter(|p| p.parent_id.as_deref() == Some(id))
            .collect()
    }

    /// Parent id → children, in collection order.
    pub fn children_by_parent(&self) -> BTreeMap<String, Vec<&Page>> {
        let mut groups: BTreeMap<String, Vec<&Page>> = BTreeMap::new();
        for page in &self.pages {
            if let Some(parent) = &page.parent_id {
                groups.entry(parent.clone()).or_default().push(page);
            }
        }
        groups
    }

    pub fn favorites(&self) -> Vec<&Page> {
        self.pages.iter().filter(|p| p.is_favorite()).collect()
    }

    /// Breadcrumb path, root first, excluding the page itself.
    pub fn ancestors(&self, id: &str) -> Vec<&Page> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([id]);
        let mut cursor = self.page(id).and_then(|p| p.parent_id.as_deref());
        while let Some(parent_id) = cursor {
            if !seen.insert(parent_id) {
                break;
            }
            let Some(parent) = self.page(parent_id) else {
                break;
            };
            chain.push(parent);
            cursor = parent.parent_id.as_deref();
        }
        chain.reverse();
        chain
    }

    /// Case-insensitive search over titles and tags. Exact title matches rank
    /// first, then title substrings, then tag matches.
    pub fn search(&self, query: &str) -> Vec<&Page> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(&Page, u8)> = self
            .pages
            .iter()
            .filter_map(|page| {
                let title = page.title.to_lowercase();
                let score = if title == query {
                    1
                } else if title.contains(&query) {
                    2
                } else if page
                    .tags
                    .iter()
                    .flatten()
                    .any(|t| t.to_lowercase().contains(&query))
                {
                    3
                } else {
                    return None;
                };
                Some((page, score))
            })
            .collect();

        matches.sort_by(|(a, score_a), (b, score_b)| {
            score_a
                .cmp(score_b)
                .then_with(|| a.title.len().cmp(&b.title.len()))
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        matches.into_iter().map(|(page, _)| page).collect()
    }

    pub fn pages_with_tag(&self, tag: &str) -> Vec<&Page> {
        self.pages.iter().filter(|p| p.has_tag(tag)).collect()
    }
}

pub struct PageStore<B: StorageBackend> {
    adapter: PersistenceAdapter<B>,
    state: PageSnapshot,
    publisher: watch::Sender<PageSnapshot>,
}

impl<B: StorageBackend> PageStore<B> {
    /// Loads the store, seeding example pages when storage is empty.
    pub fn open(adapter: PersistenceAdapter<B>) -> Self {
        let mut pages = adapter.list_pages();
        if pages.is_empty() {
            pages = templates::seed_pages();
            adapter.save_all_pages(&pages);
            info!(count = pages.len(), "seeded empty page store");
        }

        let legacy = adapter.legacy_favorites();
        if !legacy.is_empty() {
            for id in &legacy {
                if pages.iter().any(|p| &p.id == id && !p.is_favorite()) {
                    adapter.update_page(id, PageUpdate::favorite(true));
                }
            }
            adapter.clear_legacy_favorites();
            pages = adapter.list_pages();
            debug!(count = legacy.len(), "folded legacy favorites into pages");
        }

        let stored = adapter.current_page_id();
        let current_page_id = match stored {
            Some(id) if pages.iter().any(|p| p.id == id) => Some(id),
            _ => pages.first().map(|p| p.id.clone()),
        };

        let state = PageSnapshot {
            pages,
            current_page_id,
            sidebar_open: adapter.sidebar_open(),
        };
        let (publisher, _) = watch::channel(state.clone());
        Self {
            adapter,
            state,
            publisher,
        }
    }

    pub fn shared(self) -> SharedPageStore<B> {
        Arc::new(Mutex::new(self))
    }

    pub fn adapter(&self) -> &PersistenceAdapter<B> {
        &self.adapter
    }

    pub fn subscribe(&self) -> watch::Receiver<PageSnapshot> {
        self.publisher.subscribe()
    }

    pub fn snapshot(&self) -> &PageSnapshot {
        &self.state
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }

    fn refresh_pages(&mut self) {
        self.state.pages = self.adapter.list_pages();
    }

    // --- Reads ---

    pub fn pages(&self) -> &[Page] {
        &self.state.pages
    }

    pub fn page(&self, id: &str) -> Option<&Page> {
        self.state.page(id)
    }

    pub fn current_page_id(&self) -> Option<&str> {
        self.state.current_page_id.as_deref()
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.state.current_page()
    }

    pub fn sidebar_open(&self) -> bool {
        self.state.sidebar_open
    }

    /// Recently visited pages that still exist, most recent first.
    pub fn recent_pages(&self) -> Vec<&Page> {
        self.adapter
            .recent_pages()
            .iter()
            .filter_map(|visit| self.state.page(&visit.page_id))
            .collect()
    }

    // --- Mutations ---

    pub fn create(&mut self, mut new_page: NewPage) -> Result<Page> {
        if new_page.title.trim().is_empty() {
            return Err(PagekeepError::InvalidTitle);
        }
        if new_page.id.is_empty() {
            new_page.id = Uuid::new_v4().to_string();
        }
        if self.page(&new_page.id).is_some() {
            return Err(PagekeepError::DuplicateId(new_page.id));
        }
        if let Some(parent) = &new_page.parent_id {
            if self.page(parent).is_none() {
                return Err(PagekeepError::UnknownParent(parent.clone()));
            }
        }

        let page = self.adapter.create_page(new_page);
        self.refresh_pages();
        self.set_selection(Some(page.id.clone()));
        self.publish();
        debug!(id = %page.id, "created page");
        Ok(page)
    }

    pub fn create_from_template(&mut self, template_id: &str, new_page: NewPage) -> Result<Page> {
        let template = templates::find_template(template_id)
            .ok_or_else(|| PagekeepError::UnknownTemplate(template_id.to_string()))?;
        let new_page = if new_page.icon.is_none() {
            new_page.icon(template.icon)
        } else {
            new_page
        };
        self.create(new_page.content(template.content.clone()))
    }

    /// Returns `Ok(None)` when no page has `id`.
    pub fn update(&mut self, id: &str, update: PageUpdate) -> Result<Option<Page>> {
        if self.page(id).is_none() {
            return Ok(None);
        }
        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(PagekeepError::InvalidTitle);
            }
        }
        if let Some(Some(parent)) = &update.parent_id {
            self.check_parent(id, parent)?;
        }

        let updated = self.adapter.update_page(id, update);
        if updated.is_some() {
            self.refresh_pages();
            self.publish();
        }
        Ok(updated)
    }

    pub fn update_content(&mut self, id: &str, content: DocNode) -> Option<Page> {
        let updated = self.adapter.update_page(id, PageUpdate::content(content));
        if updated.is_some() {
            self.refresh_pages();
            self.publish();
        }
        updated
    }

    fn check_parent(&self, id: &str, parent: &str) -> Result<()> {
        if self.page(parent).is_none() {
            return Err(PagekeepError::UnknownParent(parent.to_string()));
        }
        let cyclic = parent == id || self.state.ancestors(parent).iter().any(|p| p.id == id);
        if cyclic {
            return Err(PagekeepError::CyclicParent {
                page: id.to_string(),
                parent: parent.to_string(),
            });
        }
        Ok(())
    }

    /// Removes the page. If it was selected, selection moves to the first
    /// remaining page, or to none.
    pub fn delete(&mut self, id: &str) -> bool {
        if !self.adapter.delete_page(id) {
            return false;
        }
        self.refresh_pages();
        if self.current_page_id() == Some(id) {
            let next = self.state.pages.first().map(|p| p.id.clone());
            self.adapter.set_current_page_id(next.as_deref());
            self.state.current_page_id = next;
        }
        self.publish();
        debug!(%id, "deleted page");
        true
    }

    /// Returns false (and changes nothing) for unknown ids.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        if let Some(id) = id {
            if self.page(id).is_none() {
                return false;
            }
        }
        self.set_selection(id.map(str::to_string));
        self.publish();
        true
    }

    fn set_selection(&mut self, id: Option<String>) {
        self.adapter.set_current_page_id(id.as_deref());
        if let Some(id) = &id {
            self.adapter.record_visit(id);
        }
        self.state.current_page_id = id;
    }

    /// Returns the new favorite state, or `None` for unknown ids.
    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        let state = self.adapter.toggle_favorite(id)?;
        self.refresh_pages();
        self.publish();
        Some(state)
    }

    pub fn set_sidebar_open(&mut self, open: bool) {
        self.adapter.set_sidebar_open(open);
        self.state.sidebar_open = open;
        self.publish();
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        let open = !self.state.sidebar_open;
        self.set_sidebar_open(open);
        open
    }

    /// Re-reads everything from storage, e.g. after another process wrote to it.
    pub fn reload(&mut self) {
        self.refresh_pages();
        let stored = self.adapter.current_page_id();
        self.state.current_page_id = match stored {
            Some(id) if self.page(&id).is_some() => Some(id),
            _ => self.state.pages.first().map(|p| p.id.clone()),
        };
        self.state.sidebar_open = self.adapter.sidebar_open();
        self.publish();
    }
}
