//! # Pagekeep Architecture
//!
//! Pagekeep is a **local-first page library**: a hierarchy of rich-text pages
//! persisted in named storage slots, a reactive page store, and a bridge that
//! keeps a live editor's content saved without blocking typing. The CLI and
//! the HTTP content API are two clients of the same core.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Clients: CLI (cli/, wired by main.rs), content API         │
//! │  (server.rs), editor integrations (bridge/)                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs) + Command Layer (commands/*.rs)         │
//! │  - Selector resolution, one module per operation            │
//! │  - Returns structured `CmdResult`s, never prints            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Page Store (page_store.rs)                                 │
//! │  - In-memory pages + selection, validation, subscriptions   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - PersistenceAdapter over a StorageBackend                 │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Saving Edits
//!
//! The editor never writes pages directly. It hands every change to the
//! [`bridge`], which debounces, writes a local fallback snapshot, updates the
//! page through the store and finally posts the content to the API. A failed
//! remote save leaves the local copy intact; the next load picks it up.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** and the **page store**: unit tests against `MemBackend`.
//! 2. **Storage**: `FsBackend` round trips in temporary directories.
//! 3. **Bridge**: integration tests on paused tokio time with scripted remotes.
//! 4. **Content API**: router tests through `tower::ServiceExt::oneshot`.
//! 5. **CLI**: end-to-end runs of the binary against a temporary data dir.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for page operations
//! - [`commands`]: Business logic for each command
//! - [`page_store`]: Page collection, selection and derived views
//! - [`store`]: Slot storage and the persistence adapter
//! - [`bridge`]: Debounced editor sync and save status
//! - [`server`]: HTTP content API
//! - [`model`]: Core data types (`Page`, `NewPage`, `PageUpdate`)
//! - [`document`]: Editor document trees
//! - [`render`]: HTML and markdown rendering of document trees
//! - [`templates`]: Page templates, seed pages and the default document
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod bridge;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod model;
pub mod page_store;
pub mod render;
pub mod server;
pub mod store;
pub mod templates;
