//! Conversion queue state object and the dispatch pass.
//!
//! [`ConversionQueue`] owns the [`QueueStore`], the "pass in progress"
//! gate and the event bus. Front ends only reach queue state through its
//! methods. It is designed to be shared via `Arc<ConversionQueue>`.

use std::sync::atomic::{AtomicBool, Ordering};

use futures::StreamExt;
use omniconvert_core::download::{resolve_download, DownloadArtifact};
use omniconvert_core::entry::{ConversionStatus, Entry, EntryPatch, EntryState, FilePayload};
use omniconvert_core::intake::{self, Rejection, DEFAULT_MAX_FILE_SIZE_BYTES};
use omniconvert_core::queue::QueueStore;
use omniconvert_core::types::EntryId;
use tokio::sync::{broadcast, RwLock};

use crate::dispatcher::Dispatcher;
use crate::error::DispatchError;
use crate::events::{EventBus, QueueEvent};

/// Default number of conversions in flight during a pass.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 1;

/// Tunables for a [`ConversionQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    /// Maximum conversions in flight during a pass. Values below 1 are
    /// treated as 1.
    pub max_in_flight: usize,
    /// Per-file intake ceiling in bytes.
    pub max_file_size_bytes: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
        }
    }
}

/// Result of [`ConversionQueue::add_files`].
#[derive(Debug, Default)]
pub struct AddOutcome {
    /// Ids of the appended entries, in queue order. Includes unsupported
    /// files, which are appended already failed.
    pub accepted: Vec<EntryId>,
    /// Files refused at intake (size ceiling).
    pub rejected: Vec<Rejection>,
}

/// Counts for one dispatch pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    /// Idle entries in the pass snapshot.
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    /// Entries removed before or during their conversion; their outcome
    /// was discarded.
    pub skipped: usize,
}

/// Outcome of a single entry within a pass.
enum EntryOutcome {
    Completed,
    Failed,
    Skipped,
}

/// Clears the pass gate when dropped, including when the pass future is
/// dropped mid-flight.
struct PassGuard<'a>(&'a AtomicBool);

impl<'a> PassGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The conversion queue: entry store, dispatcher and pass gate.
pub struct ConversionQueue {
    store: RwLock<QueueStore>,
    dispatcher: Dispatcher,
    events: EventBus,
    processing: AtomicBool,
    config: QueueConfig,
}

impl ConversionQueue {
    pub fn new(dispatcher: Dispatcher, config: QueueConfig) -> Self {
        Self {
            store: RwLock::new(QueueStore::new()),
            dispatcher,
            events: EventBus::default(),
            processing: AtomicBool::new(false),
            config,
        }
    }

    pub fn config(&self) -> QueueConfig {
        self.config
    }

    /// Subscribe to queue events.
    pub fn subscribe(&self) -> broadcast::Receiver<QueueEvent> {
        self.events.subscribe()
    }

    /// Whether a dispatch pass is currently running.
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    // ---- user operations ----

    /// Categorize and append files. Oversize files are rejected; files of
    /// unsupported type are appended already failed.
    pub async fn add_files(&self, payloads: Vec<FilePayload>) -> AddOutcome {
        let (entries, rejected) = intake::admit(payloads, self.config.max_file_size_bytes);

        for rejection in &rejected {
            tracing::warn!(
                file = %rejection.file_name,
                error = %rejection.error,
                "File rejected at intake",
            );
        }

        let accepted: Vec<EntryId> = entries.iter().map(|e| e.id).collect();
        self.store.write().await.append(entries);

        if !accepted.is_empty() {
            tracing::info!(count = accepted.len(), "Files queued");
            self.events.publish(QueueEvent::EntriesAdded {
                ids: accepted.clone(),
            });
        }

        AddOutcome { accepted, rejected }
    }

    /// Remove an entry. Returns `false` if it was not queued.
    ///
    /// Removing an entry mid-conversion does not stop the in-flight call;
    /// its outcome is discarded.
    pub async fn remove(&self, id: EntryId) -> bool {
        let removed = self.store.write().await.remove_by_id(id).is_some();
        if removed {
            self.events.publish(QueueEvent::EntryRemoved { id });
        }
        removed
    }

    /// Change the target of an IDLE entry. Returns `false` if the entry is
    /// missing, no longer IDLE, or the target is not valid for its category.
    pub async fn set_target(&self, id: EntryId, target_format: &str) -> bool {
        let changed = self
            .store
            .write()
            .await
            .update_by_id(id, EntryPatch::target(target_format));
        if changed {
            self.events.publish(QueueEvent::TargetChanged {
                id,
                target_format: target_format.to_string(),
            });
        }
        changed
    }

    /// Remove every COMPLETED entry. Returns the count removed.
    pub async fn clear_completed(&self) -> usize {
        let removed = self.store.write().await.clear_completed();
        if removed > 0 {
            self.events.publish(QueueEvent::CompletedCleared { removed });
        }
        removed
    }

    /// Snapshot of all entries in queue order.
    pub async fn entries(&self) -> Vec<Entry> {
        self.store.read().await.all()
    }

    pub async fn get(&self, id: EntryId) -> Option<Entry> {
        self.store.read().await.get(id).cloned()
    }

    pub async fn idle_count(&self) -> usize {
        self.store.read().await.idle_count()
    }

    /// Count of entries currently in `status`.
    pub async fn count_with(&self, status: ConversionStatus) -> usize {
        self.store.read().await.count_with(status)
    }

    /// Download artifact for a COMPLETED entry.
    pub async fn download(&self, id: EntryId) -> Option<DownloadArtifact> {
        self.store.read().await.get(id).and_then(resolve_download)
    }

    // ---- dispatch ----

    /// Run one dispatch pass over the entries that are IDLE right now.
    ///
    /// At most `max_in_flight` conversions run at once. With the default of
    /// one, entries are converted in queue order, each reaching a terminal
    /// state before the next starts. Entries added during the pass wait for
    /// the next one. A failure on one entry never stops the pass.
    /// Returns [`DispatchError::AlreadyRunning`] without touching the queue
    /// if a pass is active.
    pub async fn run_queue(&self) -> Result<PassSummary, DispatchError> {
        let _guard = PassGuard::acquire(&self.processing).ok_or(DispatchError::AlreadyRunning)?;

        let snapshot: Vec<EntryId> = self.store.read().await.idle().iter().map(|e| e.id).collect();
        let mut summary = PassSummary {
            total: snapshot.len(),
            ..PassSummary::default()
        };

        if snapshot.is_empty() {
            tracing::debug!("No idle entries; nothing to dispatch");
            return Ok(summary);
        }

        tracing::info!(
            total = summary.total,
            max_in_flight = self.max_in_flight(),
            "Dispatch pass started",
        );
        self.events.publish(QueueEvent::PassStarted {
            total: summary.total,
        });

        let outcomes: Vec<EntryOutcome> = futures::stream::iter(snapshot)
            .map(|id| self.process_entry(id))
            .buffered(self.max_in_flight())
            .collect()
            .await;

        for outcome in outcomes {
            match outcome {
                EntryOutcome::Completed => summary.completed += 1,
                EntryOutcome::Failed => summary.failed += 1,
                EntryOutcome::Skipped => summary.skipped += 1,
            }
        }

        tracing::info!(
            completed = summary.completed,
            failed = summary.failed,
            skipped = summary.skipped,
            "Dispatch pass finished",
        );
        self.events.publish(QueueEvent::PassFinished {
            completed: summary.completed,
            failed: summary.failed,
        });

        Ok(summary)
    }

    fn max_in_flight(&self) -> usize {
        self.config.max_in_flight.max(1)
    }

    /// Move one entry through PROCESSING to a terminal state.
    async fn process_entry(&self, id: EntryId) -> EntryOutcome {
        // Re-read under the write lock: the entry may have been removed
        // since the snapshot, and its target may have changed while IDLE.
        let entry = {
            let mut store = self.store.write().await;
            if !store.update_by_id(id, EntryPatch::state(EntryState::Processing)) {
                return EntryOutcome::Skipped;
            }
            match store.get(id) {
                Some(entry) => entry.clone(),
                None => return EntryOutcome::Skipped,
            }
        };
        self.publish_status(id, &EntryState::Processing);

        tracing::info!(
            entry_id = %id,
            file = %entry.payload.name,
            category = %entry.category,
            target_format = %entry.target_format,
            "Converting",
        );

        let (next, outcome) = match self.dispatcher.convert(&entry).await {
            Ok(result) => (EntryState::Completed(result), EntryOutcome::Completed),
            Err(e) => {
                tracing::warn!(
                    entry_id = %id,
                    file = %entry.payload.name,
                    error = %e,
                    "Conversion failed",
                );
                (EntryState::failed(&e), EntryOutcome::Failed)
            }
        };

        let applied = self
            .store
            .write()
            .await
            .update_by_id(id, EntryPatch::state(next.clone()));
        if !applied {
            tracing::debug!(entry_id = %id, "Entry removed during conversion; result discarded");
            return EntryOutcome::Skipped;
        }

        self.publish_status(id, &next);
        outcome
    }

    fn publish_status(&self, id: EntryId, state: &EntryState) {
        let error = match state {
            EntryState::Error(message) => Some(message.clone()),
            _ => None,
        };
        self.events.publish(QueueEvent::StatusChanged {
            id,
            status: state.status(),
            error,
        });
    }
}
