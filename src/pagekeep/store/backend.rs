use crate::error::Result;
use std::fmt;

/// The fixed set of named storage slots. Every slot holds one JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Pages,
    CurrentPageId,
    /// Legacy favorites list, folded into `Page::is_favorite` on open.
    Favorites,
    SidebarOpen,
    RecentPages,
    EditorContent,
    EditorHtml,
    EditorMarkdown,
}

impl Slot {
    pub const ALL: [Slot; 8] = [
        Slot::Pages,
        Slot::CurrentPageId,
        Slot::Favorites,
        Slot::SidebarOpen,
        Slot::RecentPages,
        Slot::EditorContent,
        Slot::EditorHtml,
        Slot::EditorMarkdown,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Slot::Pages => "pages",
            Slot::CurrentPageId => "current_page_id",
            Slot::Favorites => "favorites",
            Slot::SidebarOpen => "sidebar_open",
            Slot::RecentPages => "recent_pages",
            Slot::EditorContent => "editor_content",
            Slot::EditorHtml => "editor_html",
            Slot::EditorMarkdown => "editor_markdown",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Abstract interface for raw slot I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while `PersistenceAdapter` handles the "what" (records, defaults, recovery).
pub trait StorageBackend {
    /// Read the raw JSON text of a slot.
    /// Returns Ok(None) if the slot has never been written or was removed.
    fn read_slot(&self, slot: Slot) -> Result<Option<String>>;

    /// Replace the slot's contents. MUST be atomic: readers see either the
    /// old or the new value, never a partial write.
    fn write_slot(&self, slot: Slot, value: &str) -> Result<()>;

    /// Remove the slot. Removing a missing slot is not an error.
    fn remove_slot(&self, slot: Slot) -> Result<()>;
}
