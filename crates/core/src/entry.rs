//! Queue entry model.
//!
//! An [`Entry`] pairs an immutable [`FilePayload`] with its category,
//! the user's chosen target format, and an [`EntryState`]. Terminal data
//! lives inside the state variants, so a result can only exist on a
//! completed entry and an error message only on a failed one.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::category::{categorize, Category};
use crate::error::ConversionError;
use crate::types::{EntryId, Timestamp};

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// The original file as supplied at intake. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub name: String,
    /// Declared media type, e.g. `"image/png"`. May be empty.
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl FilePayload {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Size formatted for listings, e.g. `"12.3 KB"`.
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.size() as f64 / 1024.0)
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Output of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionResult {
    /// Free-form text produced by the inference service.
    Text(String),
    /// Encoded bytes with their own media type (local re-encode).
    Binary { bytes: Vec<u8>, media_type: String },
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Flat status label, used for events and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversionStatus {
    Idle,
    Processing,
    Completed,
    Error,
}

impl ConversionStatus {
    /// `true` for `Completed` and `Error`.
    pub fn is_terminal(self) -> bool {
        matches!(self, ConversionStatus::Completed | ConversionStatus::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConversionStatus::Idle => "IDLE",
            ConversionStatus::Processing => "PROCESSING",
            ConversionStatus::Completed => "COMPLETED",
            ConversionStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Lifecycle state carrying the terminal data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    Idle,
    Processing,
    Completed(ConversionResult),
    Error(String),
}

/// Message stored when a failure carries no text of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed";

impl EntryState {
    pub fn status(&self) -> ConversionStatus {
        match self {
            EntryState::Idle => ConversionStatus::Idle,
            EntryState::Processing => ConversionStatus::Processing,
            EntryState::Completed(_) => ConversionStatus::Completed,
            EntryState::Error(_) => ConversionStatus::Error,
        }
    }

    /// Build an error state from a conversion failure, substituting the
    /// generic message when the failure's text is empty.
    pub fn failed(err: &ConversionError) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            EntryState::Error(GENERIC_FAILURE_MESSAGE.to_string())
        } else {
            EntryState::Error(message)
        }
    }

    /// Whether the state machine permits moving from `self` to `next`.
    ///
    /// IDLE -> PROCESSING -> {COMPLETED, ERROR}. Terminal states are final.
    pub fn can_transition_to(&self, next: &EntryState) -> bool {
        matches!(
            (self.status(), next.status()),
            (ConversionStatus::Idle, ConversionStatus::Processing)
                | (ConversionStatus::Processing, ConversionStatus::Completed)
                | (ConversionStatus::Processing, ConversionStatus::Error)
        )
    }
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// A queued file.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: EntryId,
    pub payload: Arc<FilePayload>,
    pub category: Category,
    pub target_format: String,
    pub state: EntryState,
    pub created_at: Timestamp,
}

impl Entry {
    /// Categorize a payload and create its queue entry.
    ///
    /// The target defaults to the first catalog option for the category.
    /// Unsupported files start out failed and are never dispatched.
    pub fn new(payload: FilePayload) -> Self {
        let category = categorize(&payload.media_type, &payload.name);
        let state = if category == Category::Unknown {
            EntryState::failed(&ConversionError::UnsupportedFileType)
        } else {
            EntryState::Idle
        };

        Self {
            id: uuid::Uuid::new_v4(),
            payload: Arc::new(payload),
            category,
            target_format: catalog::default_target(category).to_string(),
            state,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn status(&self) -> ConversionStatus {
        self.state.status()
    }

    pub fn result(&self) -> Option<&ConversionResult> {
        match &self.state {
            EntryState::Completed(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            EntryState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Whether this entry's target requires the inference service.
    pub fn is_externally_computed(&self) -> bool {
        catalog::is_externally_computed(self.category, &self.target_format)
    }
}

/// Partial update applied by [`QueueStore::update_by_id`](crate::queue::QueueStore::update_by_id).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub target_format: Option<String>,
    pub state: Option<EntryState>,
}

impl EntryPatch {
    pub fn target(format: impl Into<String>) -> Self {
        Self {
            target_format: Some(format.into()),
            state: None,
        }
    }

    pub fn state(state: EntryState) -> Self {
        Self {
            target_format: None,
            state: Some(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, media_type: &str) -> FilePayload {
        FilePayload::new(name, media_type, b"data".to_vec())
    }

    #[test]
    fn new_entry_is_idle_with_default_target() {
        let entry = Entry::new(payload("photo.jpg", "image/jpeg"));
        assert_eq!(entry.category, Category::Image);
        assert_eq!(entry.status(), ConversionStatus::Idle);
        assert_eq!(entry.target_format, "image/png");
        assert!(entry.result().is_none());
        assert!(entry.error().is_none());
    }

    #[test]
    fn unknown_file_starts_failed() {
        let entry = Entry::new(payload("data.bin", "application/octet-stream"));
        assert_eq!(entry.category, Category::Unknown);
        assert_eq!(entry.status(), ConversionStatus::Error);
        assert_eq!(entry.error(), Some("Unsupported file type"));
        assert_eq!(entry.target_format, catalog::FALLBACK_TARGET);
    }

    #[test]
    fn ids_are_unique() {
        let a = Entry::new(payload("a.txt", "text/plain"));
        let b = Entry::new(payload("a.txt", "text/plain"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn status_labels_honor_width() {
        assert_eq!(format!("{:<11}|", ConversionStatus::Idle), "IDLE       |");
        assert_eq!(ConversionStatus::Error.to_string(), "ERROR");
    }

    #[test]
    fn transitions() {
        let done = EntryState::Completed(ConversionResult::Text("x".into()));
        let failed = EntryState::Error("x".into());

        assert!(EntryState::Idle.can_transition_to(&EntryState::Processing));
        assert!(EntryState::Processing.can_transition_to(&done));
        assert!(EntryState::Processing.can_transition_to(&failed));

        assert!(!EntryState::Idle.can_transition_to(&done));
        assert!(!done.can_transition_to(&EntryState::Processing));
        assert!(!failed.can_transition_to(&EntryState::Idle));
        assert!(!EntryState::Processing.can_transition_to(&EntryState::Processing));
    }

    #[test]
    fn empty_failure_message_uses_fallback() {
        let state = EntryState::failed(&ConversionError::Service(String::new()));
        assert_eq!(state, EntryState::Error(GENERIC_FAILURE_MESSAGE.to_string()));

        let state = EntryState::failed(&ConversionError::Service("quota exceeded".into()));
        assert_eq!(state, EntryState::Error("quota exceeded".to_string()));
    }

    #[test]
    fn size_label() {
        let p = FilePayload::new("a", "text/plain", vec![0u8; 12_595]);
        assert_eq!(p.size(), 12_595);
        assert_eq!(p.size_label(), "12.3 KB");
    }
}
