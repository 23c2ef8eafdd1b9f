use std::fmt;

/// Save state shown next to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    /// No unsaved edits.
    #[default]
    Saved,
    /// Edited since the last flush.
    Unsaved,
    /// Flush in progress.
    Saving,
    /// The remote save failed. The local fallback already holds the edit.
    SaveFailed,
    /// Flushed to local storage only (no page selected).
    SavedLocalOnly,
}

impl SaveStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SaveStatus::Saved => "Saved",
            SaveStatus::Unsaved => "Unsaved",
            SaveStatus::Saving => "Saving...",
            SaveStatus::SaveFailed => "Save failed",
            SaveStatus::SavedLocalOnly => "Saved (local only)",
        }
    }

    /// True while an edit has not reached its final destination yet.
    pub fn is_pending(&self) -> bool {
        matches!(self, SaveStatus::Unsaved | SaveStatus::Saving)
    }
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
