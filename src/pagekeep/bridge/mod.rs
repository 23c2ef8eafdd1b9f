//! # Editor Content Bridge
//!
//! Connects a live editor to the page store. The editor reports every change
//! through [`BridgeHandle::edit`]; the bridge coalesces bursts of edits and
//! flushes only the last one once the editor has been quiet for the debounce
//! window.
//!
//! A flush always lands in three places, in this order:
//! 1. the local fallback slots (tree, HTML and markdown), unconditionally,
//! 2. the target page's `content` through the [`PageStore`],
//! 3. the content API via [`ContentRemote`], in a spawned task.
//!
//! Steps 2 and 3 are skipped when the edit had no target page, which is
//! reported as [`SaveStatus::SavedLocalOnly`]. The target page is the
//! selection at the moment of the edit. Switching the selection while an edit
//! is pending flushes that edit to its original page first.
//!
//! ## Task Model
//!
//! One task owns the pending buffer and the debounce deadline. The handle
//! talks to it over an unbounded channel, and remote saves report back over a
//! second channel. Every edit takes the next value of a shared sequence; a
//! flush or remote outcome only touches the status when its sequence is still
//! the latest, so a slow response can never overwrite the status of a newer
//! edit. The sequence is bumped and compared under the status channel's lock,
//! so an edit racing a flush always leaves the status at `Unsaved`.
//!
//! Remote failures are also tracked per page in [`BridgeHandle::failed_pages`],
//! because a page switch can leave the status describing a different page
//! than the one whose save failed.
//!
//! There is no retry. After [`SaveStatus::SaveFailed`] the next edit starts a
//! new cycle, and the fallback slots still hold the failed content.

mod remote;
mod status;

pub use remote::{ContentRemote, HttpRemote, SaveContentRequest, SaveContentResponse};
pub use status::SaveStatus;

use crate::config::AppConfig;
use crate::document::DocNode;
use crate::error::Result;
use crate::model::EditorSnapshot;
use crate::page_store::{PageStore, SharedPageStore};
use crate::render;
use crate::store::StorageBackend;
use crate::templates;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

pub type SharedRemote = Arc<dyn ContentRemote>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeConfig {
    pub debounce: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
        }
    }
}

impl From<&AppConfig> for BridgeConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            debounce: config.debounce(),
        }
    }
}

/// Starting content for the editor: the selected page's content if it has
/// any, else the last fallback snapshot, else the default document.
pub fn load_initial_content<B: StorageBackend>(store: &PageStore<B>) -> DocNode {
    if let Some(page) = store.current_page() {
        if !page.content.is_empty() {
            return page.content.clone();
        }
    }
    store
        .adapter()
        .fallback_content()
        .filter(|content| !content.is_empty())
        .unwrap_or_else(templates::default_document)
}

struct PendingEdit {
    seq: u64,
    page_id: Option<String>,
    content: DocNode,
}

enum Command {
    Edit(PendingEdit),
    Flush(oneshot::Sender<()>),
    Shutdown(oneshot::Sender<()>),
}

struct RemoteOutcome {
    seq: u64,
    page_id: String,
    result: Result<()>,
}

pub struct EditorBridge;

impl EditorBridge {
    /// Starts the bridge task. Must be called from within a tokio runtime.
    pub fn spawn<B>(
        store: SharedPageStore<B>,
        remote: Option<SharedRemote>,
        config: BridgeConfig,
    ) -> BridgeHandle<B>
    where
        B: StorageBackend + Send + 'static,
    {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let status = Arc::new(watch::Sender::new(SaveStatus::Saved));
        let words = Arc::new(watch::Sender::new(0));
        let failed = Arc::new(watch::Sender::new(BTreeSet::new()));
        let edit_seq = Arc::new(AtomicU64::new(0));

        let worker = Worker {
            store: store.clone(),
            remote,
            config,
            status: status.clone(),
            words: words.clone(),
            failed: failed.clone(),
            edit_seq: edit_seq.clone(),
            in_flight: HashMap::new(),
            pending: None,
            deadline: None,
            outcome_tx,
            outcome_rx,
        };
        let task = tokio::spawn(worker.run(command_rx));

        BridgeHandle {
            store,
            commands,
            status,
            words,
            failed,
            edit_seq,
            task,
        }
    }
}

pub struct BridgeHandle<B: StorageBackend> {
    store: SharedPageStore<B>,
    commands: mpsc::UnboundedSender<Command>,
    status: Arc<watch::Sender<SaveStatus>>,
    words: Arc<watch::Sender<usize>>,
    failed: Arc<watch::Sender<BTreeSet<String>>>,
    edit_seq: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl<B: StorageBackend> BridgeHandle<B> {
    /// Records a new editor state. The status turns `Unsaved` before this
    /// returns; the flush happens after the debounce window.
    pub fn edit(&self, content: DocNode) {
        let page_id = self.store.lock().current_page_id().map(str::to_string);
        let mut seq = 0;
        self.status.send_modify(|status| {
            seq = self.edit_seq.fetch_add(1, Ordering::SeqCst) + 1;
            *status = SaveStatus::Unsaved;
        });
        let edit = PendingEdit {
            seq,
            page_id,
            content,
        };
        if self.commands.send(Command::Edit(edit)).is_err() {
            warn!(seq, "editor bridge stopped, edit dropped");
        }
    }

    /// Flushes the pending edit without waiting for the debounce window.
    /// Returns once the local writes are done; the remote save may still be
    /// in flight.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.commands.send(Command::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }

    pub fn status(&self) -> watch::Receiver<SaveStatus> {
        self.status.subscribe()
    }

    pub fn current_status(&self) -> SaveStatus {
        *self.status.borrow()
    }

    /// Word count of the last flushed content.
    pub fn word_count(&self) -> watch::Receiver<usize> {
        self.words.subscribe()
    }

    /// Pages whose most recent remote save failed.
    pub fn failed_pages(&self) -> watch::Receiver<BTreeSet<String>> {
        self.failed.subscribe()
    }

    pub fn initial_content(&self) -> DocNode {
        load_initial_content(&self.store.lock())
    }

    /// Flushes any pending edit and stops the bridge task.
    pub async fn shutdown(self) {
        let (ack, done) = oneshot::channel();
        if self.commands.send(Command::Shutdown(ack)).is_ok() {
            let _ = done.await;
        }
        if let Err(e) = self.task.await {
            warn!(error = %e, "editor bridge task ended abnormally");
        }
    }
}

struct Worker<B: StorageBackend> {
    store: SharedPageStore<B>,
    remote: Option<SharedRemote>,
    config: BridgeConfig,
    status: Arc<watch::Sender<SaveStatus>>,
    words: Arc<watch::Sender<usize>>,
    failed: Arc<watch::Sender<BTreeSet<String>>>,
    edit_seq: Arc<AtomicU64>,
    /// Sequence of the newest remote save sent for each page.
    in_flight: HashMap<String, u64>,
    pending: Option<PendingEdit>,
    deadline: Option<Instant>,
    outcome_tx: mpsc::UnboundedSender<RemoteOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<RemoteOutcome>,
}

impl<B> Worker<B>
where
    B: StorageBackend + Send + 'static,
{
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        loop {
            let deadline = self.deadline;
            let timer = async move {
                match deadline {
                    Some(at) => sleep_until(at).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Edit(edit)) => self.on_edit(edit),
                    Some(Command::Flush(ack)) => {
                        self.flush_pending();
                        let _ = ack.send(());
                    }
                    Some(Command::Shutdown(ack)) => {
                        self.flush_pending();
                        let _ = ack.send(());
                        break;
                    }
                    None => {
                        self.flush_pending();
                        break;
                    }
                },
                _ = timer => self.flush_pending(),
                Some(outcome) = self.outcome_rx.recv() => self.on_outcome(outcome),
            }
        }
        debug!("editor bridge stopped");
    }

    /// Sets the status on behalf of edit `seq`, unless a newer edit exists.
    /// The check runs under the channel lock that `edit` bumps the sequence
    /// under.
    fn set_status(&self, seq: u64, next: SaveStatus) -> bool {
        let edit_seq = &self.edit_seq;
        self.status.send_if_modified(|status| {
            if seq != edit_seq.load(Ordering::SeqCst) {
                return false;
            }
            *status = next;
            true
        })
    }

    fn on_edit(&mut self, edit: PendingEdit) {
        let switched = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.page_id != edit.page_id);
        if switched {
            self.flush_pending();
        }
        self.pending = Some(edit);
        self.deadline = Some(Instant::now() + self.config.debounce);
    }

    fn flush_pending(&mut self) {
        self.deadline = None;
        let Some(edit) = self.pending.take() else {
            return;
        };
        self.set_status(edit.seq, SaveStatus::Saving);

        let snapshot = render::snapshot(&edit.content).unwrap_or_else(|e| {
            warn!(error = %e, "markdown rendering failed, keeping tree and html only");
            EditorSnapshot {
                content: edit.content.clone(),
                html: render::to_html(&edit.content),
                markdown: String::new(),
            }
        });
        if !self.store.lock().adapter().save_editor_snapshot(&snapshot) {
            warn!(seq = edit.seq, "local fallback snapshot was not written");
        }
        self.words.send_replace(edit.content.word_count());

        let Some(page_id) = edit.page_id else {
            debug!(seq = edit.seq, "flushed without a selected page");
            self.set_status(edit.seq, SaveStatus::SavedLocalOnly);
            return;
        };

        let updated = self.store.lock().update_content(&page_id, edit.content);
        if updated.is_none() {
            debug!(%page_id, seq = edit.seq, "target page is gone, kept local copy only");
            self.set_status(edit.seq, SaveStatus::SavedLocalOnly);
            return;
        }
        debug!(%page_id, seq = edit.seq, "flushed page content");

        let Some(remote) = self.remote.clone() else {
            self.set_status(edit.seq, SaveStatus::Saved);
            return;
        };

        let request = SaveContentRequest {
            content: snapshot.content,
            html: Some(snapshot.html),
            markdown: Some(snapshot.markdown),
        };
        let outcomes = self.outcome_tx.clone();
        let seq = edit.seq;
        self.in_flight.insert(page_id.clone(), seq);
        tokio::spawn(async move {
            let result = remote.save_content(&page_id, &request).await;
            let _ = outcomes.send(RemoteOutcome {
                seq,
                page_id,
                result,
            });
        });
    }

    fn on_outcome(&mut self, outcome: RemoteOutcome) {
        let RemoteOutcome {
            seq,
            page_id,
            result,
        } = outcome;
        if let Err(e) = &result {
            warn!(%page_id, seq, error = %e, "remote save failed");
        }

        if self.in_flight.get(&page_id) == Some(&seq) {
            self.in_flight.remove(&page_id);
            let failed = result.is_err();
            self.failed.send_if_modified(|pages| {
                if failed {
                    pages.insert(page_id.clone())
                } else {
                    pages.remove(&page_id)
                }
            });
        }

        let status = match result {
            Ok(()) => SaveStatus::Saved,
            Err(_) => SaveStatus::SaveFailed,
        };
        if !self.set_status(seq, status) {
            debug!(%page_id, seq, "discarding stale remote result");
        }
    }
}
