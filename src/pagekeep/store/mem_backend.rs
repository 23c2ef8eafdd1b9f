use super::backend::{Slot, StorageBackend};
use crate::error::{PagekeepError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability; the page store that owns it is
/// serialized behind a mutex, so the backend itself never sees concurrent access.
#[derive(Default)]
pub struct MemBackend {
    slots: RefCell<HashMap<Slot, String>>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Test helper to place raw (possibly malformed) text in a slot.
    pub fn put_raw(&self, slot: Slot, raw: &str) {
        self.slots.borrow_mut().insert(slot, raw.to_string());
    }
}

impl StorageBackend for MemBackend {
    fn read_slot(&self, slot: Slot) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(&slot).cloned())
    }

    fn write_slot(&self, slot: Slot, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(PagekeepError::Store("Simulated write error".to_string()));
        }
        self.slots.borrow_mut().insert(slot, value.to_string());
        Ok(())
    }

    fn remove_slot(&self, slot: Slot) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(PagekeepError::Store("Simulated write error".to_string()));
        }
        self.slots.borrow_mut().remove(&slot);
        Ok(())
    }
}
