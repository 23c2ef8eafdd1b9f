use super::backend::{Slot, StorageBackend};
use crate::error::{PagekeepError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores each slot as `<data_dir>/<slot>.json`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn slot_path(&self, slot: Slot) -> PathBuf {
        self.root.join(format!("{}.json", slot.key()))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(PagekeepError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_slot(&self, slot: Slot) -> Result<Option<String>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path).map_err(PagekeepError::Io)?;
        Ok(Some(raw))
    }

    fn write_slot(&self, slot: Slot, value: &str) -> Result<()> {
        self.ensure_dir()?;

        // Atomic write
        let tmp_path = self
            .root
            .join(format!(".{}-{}.tmp", slot.key(), Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(PagekeepError::Io)?;
        fs::rename(&tmp_path, self.slot_path(slot)).map_err(PagekeepError::Io)?;
        Ok(())
    }

    fn remove_slot(&self, slot: Slot) -> Result<()> {
        let path = self.slot_path(slot);
        if path.exists() {
            fs::remove_file(path).map_err(PagekeepError::Io)?;
        }
        Ok(())
    }
}
