//! File intake: size ceiling and entry construction.

use crate::entry::{Entry, FilePayload};
use crate::error::CoreError;

/// Default per-file ceiling in megabytes.
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 10;

/// Default per-file ceiling in bytes (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = DEFAULT_MAX_FILE_SIZE_MB * 1024 * 1024;

/// A file refused at intake, with the reason.
#[derive(Debug)]
pub struct Rejection {
    pub file_name: String,
    pub error: CoreError,
}

/// Validate that a payload is within the size ceiling.
pub fn check_size(payload: &FilePayload, max_bytes: u64) -> Result<(), CoreError> {
    let size = payload.size();
    if size > max_bytes {
        return Err(CoreError::FileTooLarge {
            name: payload.name.clone(),
            size,
            limit: max_bytes,
        });
    }
    Ok(())
}

/// Split payloads into accepted entries and size rejections.
///
/// Accepted entries keep the argument order. Unsupported files are still
/// accepted; they are created already failed.
pub fn admit(payloads: Vec<FilePayload>, max_bytes: u64) -> (Vec<Entry>, Vec<Rejection>) {
    let mut accepted = Vec::with_capacity(payloads.len());
    let mut rejected = Vec::new();

    for payload in payloads {
        match check_size(&payload, max_bytes) {
            Ok(()) => accepted.push(Entry::new(payload)),
            Err(error) => rejected.push(Rejection {
                file_name: payload.name,
                error,
            }),
        }
    }

    (accepted, rejected)
}
