//! Queue events published on an in-process broadcast channel.
//!
//! Every observable change to the queue (intake, status transition,
//! removal, pass boundaries) is published as a [`QueueEvent`] so that a
//! front end can re-render without polling.

use omniconvert_core::entry::ConversionStatus;
use omniconvert_core::types::EntryId;
use serde::Serialize;
use tokio::sync::broadcast;

/// A state change in the conversion queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueueEvent {
    /// New entries were appended, in queue order.
    EntriesAdded { ids: Vec<EntryId> },

    /// An entry moved to a new status.
    StatusChanged {
        id: EntryId,
        status: ConversionStatus,
        /// Failure message when `status` is `ERROR`.
        error: Option<String>,
    },

    /// The user picked a different target for an idle entry.
    TargetChanged { id: EntryId, target_format: String },

    EntryRemoved { id: EntryId },

    /// Completed entries were bulk-removed.
    CompletedCleared { removed: usize },

    /// A dispatch pass started over `total` idle entries.
    PassStarted { total: usize },

    PassFinished { completed: usize, failed: usize },
}

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// Fan-out bus for [`QueueEvent`]s.
///
/// When the buffer is full the oldest events are dropped and slow
/// receivers observe `RecvError::Lagged`.
pub struct EventBus {
    sender: broadcast::Sender<QueueEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped if there are none.
    pub fn publish(&self, event: QueueEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<QueueEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
