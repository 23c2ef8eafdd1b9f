use super::backend::{Slot, StorageBackend};
use crate::document::DocNode;
use crate::model::{EditorSnapshot, NewPage, Page, PageUpdate, RecentVisit};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

const RECENT_LIMIT: usize = 20;

/// Typed record access over a [`StorageBackend`].
///
/// Nothing here returns an error to the caller. Unreadable slots are treated
/// as empty and failed writes are logged, matching how a browser profile's
/// local storage behaves when it is corrupt or full.
pub struct PersistenceAdapter<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> PersistenceAdapter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn read_json<T: DeserializeOwned>(&self, slot: Slot) -> Option<T> {
        let raw = match self.backend.read_slot(slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(%slot, error = %e, "failed to read slot");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%slot, error = %e, "discarding malformed slot data");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, slot: Slot, value: &T) -> bool {
        let written = serde_json::to_string(value)
            .map_err(Into::into)
            .and_then(|raw| self.backend.write_slot(slot, &raw));
        match written {
            Ok(()) => true,
            Err(e) => {
                error!(%slot, error = %e, "failed to save slot");
                false
            }
        }
    }

    fn remove(&self, slot: Slot) {
        if let Err(e) = self.backend.remove_slot(slot) {
            error!(%slot, error = %e, "failed to clear slot");
        }
    }

    // --- Pages ---

    /// Every readable page record. A record that does not match the page
    /// schema is skipped on its own; only unparseable JSON empties the list.
    pub fn list_pages(&self) -> Vec<Page> {
        let records: Vec<Value> = self.read_json(Slot::Pages).unwrap_or_default();
        records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(page) => Some(page),
                Err(e) => {
                    warn!(index, error = %e, "skipping malformed page record");
                    None
                }
            })
            .collect()
    }

    pub fn save_all_pages(&self, pages: &[Page]) {
        self.write_json(Slot::Pages, pages);
    }

    pub fn get_page(&self, id: &str) -> Option<Page> {
        self.list_pages().into_iter().find(|p| p.id == id)
    }

    pub fn create_page(&self, new_page: NewPage) -> Page {
        let page = new_page.into_page(Utc::now());
        let mut pages = self.list_pages();
        pages.push(page.clone());
        self.save_all_pages(&pages);
        page
    }

    pub fn update_page(&self, id: &str, update: PageUpdate) -> Option<Page> {
        let mut pages = self.list_pages();
        let page = pages.iter_mut().find(|p| p.id == id)?;
        page.merge(update);
        let updated = page.clone();
        self.save_all_pages(&pages);
        Some(updated)
    }

    pub fn delete_page(&self, id: &str) -> bool {
        let pages = self.list_pages();
        let before = pages.len();
        let remaining: Vec<Page> = pages.into_iter().filter(|p| p.id != id).collect();
        if remaining.len() == before {
            return false;
        }
        self.save_all_pages(&remaining);
        true
    }

    // --- Selection ---

    pub fn current_page_id(&self) -> Option<String> {
        self.read_json(Slot::CurrentPageId)
    }

    pub fn set_current_page_id(&self, id: Option<&str>) {
        match id {
            Some(id) => {
                self.write_json(Slot::CurrentPageId, id);
            }
            None => self.remove(Slot::CurrentPageId),
        }
    }

    // --- Favorites ---

    pub fn favorites(&self) -> Vec<String> {
        self.list_pages()
            .into_iter()
            .filter(Page::is_favorite)
            .map(|p| p.id)
            .collect()
    }

    /// Flips the page's favorite flag. Returns the new state, or `None` when
    /// the page does not exist.
    pub fn toggle_favorite(&self, id: &str) -> Option<bool> {
        let now_favorite = !self.get_page(id)?.is_favorite();
        self.update_page(id, PageUpdate::favorite(now_favorite))
            .map(|_| now_favorite)
    }

    pub fn legacy_favorites(&self) -> Vec<String> {
        self.read_json(Slot::Favorites).unwrap_or_default()
    }

    pub fn clear_legacy_favorites(&self) {
        self.remove(Slot::Favorites);
    }

    // --- Preferences ---

    /// Defaults to open; only an explicit `false` closes the sidebar.
    pub fn sidebar_open(&self) -> bool {
        match self.backend.read_slot(Slot::SidebarOpen) {
            Ok(Some(raw)) => raw.trim() != "false",
            _ => true,
        }
    }

    pub fn set_sidebar_open(&self, open: bool) {
        self.write_json(Slot::SidebarOpen, &open);
    }

    pub fn recent_pages(&self) -> Vec<RecentVisit> {
        self.read_json(Slot::RecentPages).unwrap_or_default()
    }

    /// Most recent first, one entry per page.
    pub fn record_visit(&self, id: &str) {
        let mut visits = self.recent_pages();
        visits.retain(|v| v.page_id != id);
        visits.insert(
            0,
            RecentVisit {
                page_id: id.to_string(),
                visited_at: Utc::now(),
            },
        );
        visits.truncate(RECENT_LIMIT);
        self.write_json(Slot::RecentPages, &visits);
    }

    // --- Editor fallback ---

    pub fn fallback_content(&self) -> Option<DocNode> {
        self.read_json(Slot::EditorContent)
    }

    pub fn editor_snapshot(&self) -> Option<EditorSnapshot> {
        let content = self.fallback_content()?;
        Some(EditorSnapshot {
            content,
            html: self.read_json(Slot::EditorHtml).unwrap_or_default(),
            markdown: self.read_json(Slot::EditorMarkdown).unwrap_or_default(),
        })
    }

    /// Writes all three representations. Returns false if any write failed.
    pub fn save_editor_snapshot(&self, snapshot: &EditorSnapshot) -> bool {
        let html = self.write_json(Slot::EditorHtml, &snapshot.html);
        let content = self.write_json(Slot::EditorContent, &snapshot.content);
        let markdown = self.write_json(Slot::EditorMarkdown, &snapshot.markdown);
        html && content && markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn adapter() -> PersistenceAdapter<MemBackend> {
        PersistenceAdapter::new(MemBackend::new())
    }

    #[test]
    fn missing_or_malformed_pages_read_as_empty() {
        let adapter = adapter();
        assert!(adapter.list_pages().is_empty());

        adapter.backend().put_raw(Slot::Pages, "{not json");
        assert!(adapter.list_pages().is_empty());
    }

    #[test]
    fn mismatched_record_does_not_hide_the_others() {
        let adapter = adapter();
        adapter.backend().put_raw(
            Slot::Pages,
            r#"[
                {"id":"mine","title":"Mine","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-02T00:00:00Z"},
                {"id":"old","title":"Old","createdAt":"2024-01-01T00:00:00Z"}
            ]"#,
        );
        let ids: Vec<String> = adapter.list_pages().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["mine"]);
    }

    #[test]
    fn create_update_delete_sequence() {
        let adapter = adapter();
        let a = adapter.create_page(NewPage::new("a", "A"));
        adapter.create_page(NewPage::new("b", "B"));
        assert_eq!(a.created_at, a.updated_at);

        let updated = adapter.update_page("a", PageUpdate::title("A2")).unwrap();
        assert_eq!(updated.title, "A2");
        assert!(updated.updated_at >= a.updated_at);
        assert!(adapter.delete_page("b"));

        let pages = adapter.list_pages();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "A2");
    }

    #[test]
    fn missing_ids_are_sentinels() {
        let adapter = adapter();
        assert!(adapter.update_page("ghost", PageUpdate::title("x")).is_none());
        assert!(!adapter.delete_page("ghost"));
        assert_eq!(adapter.toggle_favorite("ghost"), None);
    }

    #[test]
    fn write_failures_are_swallowed() {
        let adapter = adapter();
        adapter.backend().set_simulate_write_error(true);
        let page = adapter.create_page(NewPage::new("a", "A"));
        assert_eq!(page.id, "a");
        assert!(adapter.list_pages().is_empty());
    }

    #[test]
    fn selection_slot_round_trips_and_clears() {
        let adapter = adapter();
        assert_eq!(adapter.current_page_id(), None);
        adapter.set_current_page_id(Some("3"));
        assert_eq!(adapter.current_page_id().as_deref(), Some("3"));
        adapter.set_current_page_id(None);
        assert_eq!(adapter.current_page_id(), None);
    }

    #[test]
    fn toggle_favorite_twice_restores_state() {
        let adapter = adapter();
        adapter.create_page(NewPage::new("a", "A"));
        assert_eq!(adapter.toggle_favorite("a"), Some(true));
        assert_eq!(adapter.favorites(), vec!["a".to_string()]);
        assert_eq!(adapter.toggle_favorite("a"), Some(false));
        assert!(adapter.favorites().is_empty());
    }

    #[test]
    fn sidebar_defaults_to_open() {
        let adapter = adapter();
        assert!(adapter.sidebar_open());
        adapter.set_sidebar_open(false);
        assert!(!adapter.sidebar_open());
        adapter.backend().put_raw(Slot::SidebarOpen, "garbage");
        assert!(adapter.sidebar_open());
    }

    #[test]
    fn recent_visits_are_deduplicated() {
        let adapter = adapter();
        adapter.record_visit("a");
        adapter.record_visit("b");
        adapter.record_visit("a");
        let ids: Vec<String> = adapter
            .recent_pages()
            .into_iter()
            .map(|v| v.page_id)
            .collect();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn recent_visits_are_capped() {
        let adapter = adapter();
        for i in 0..30 {
            adapter.record_visit(&i.to_string());
        }
        let visits = adapter.recent_pages();
        assert_eq!(visits.len(), RECENT_LIMIT);
        assert_eq!(visits[0].page_id, "29");
    }

    #[test]
    fn editor_snapshot_round_trips() {
        let adapter = adapter();
        assert!(adapter.editor_snapshot().is_none());
        let snapshot = EditorSnapshot {
            content: DocNode::doc(vec![DocNode::paragraph("draft")]),
            html: "<p>draft</p>".into(),
            markdown: "draft".into(),
        };
        assert!(adapter.save_editor_snapshot(&snapshot));
        assert_eq!(adapter.editor_snapshot(), Some(snapshot));
    }
}
