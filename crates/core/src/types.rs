/// Queue entries are keyed by a random UUID assigned at intake.
pub type EntryId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
