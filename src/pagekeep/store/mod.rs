//! # Storage Layer
//!
//! Durable state lives in a small, fixed set of named slots ([`backend::Slot`]),
//! each holding one JSON document: the page collection, the current selection,
//! UI preferences, the recent-pages log and the editor fallback snapshot.
//!
//! The layer is split in two:
//! - [`backend::StorageBackend`]: raw slot I/O ("how"). [`fs_backend::FsBackend`]
//!   keeps one file per slot, [`mem_backend::MemBackend`] keeps them in memory
//!   for tests.
//! - [`adapter::PersistenceAdapter`]: typed records over the slots ("what").
//!   Reads never fail (corrupt data reads as empty), writes are synchronous and
//!   failures are logged rather than propagated.
//!
//! There is no batching and no cross-process coordination: every write is
//! durable when the call returns and the last writer wins.
//!
//! ## Storage Layout
//!
//! ```text
//! <data-dir>/
//! ├── pages.json            # Vec<Page>
//! ├── current_page_id.json  # "id"
//! ├── sidebar_open.json     # true | false
//! ├── recent_pages.json     # Vec<RecentVisit>
//! ├── editor_content.json   # document tree of the last flush
//! ├── editor_html.json      # rendered HTML of the last flush
//! ├── editor_markdown.json  # markdown of the last flush
//! └── config.json           # AppConfig
//! ```

pub mod adapter;
pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use adapter::PersistenceAdapter;
pub use backend::{Slot, StorageBackend};
