//! Download artifact resolution for completed entries.
//!
//! Text results are wrapped as `text/plain`; binary results keep their
//! own media type. The suggested file name is derived from the original
//! name and an extension inferred from the target format.

use crate::entry::{ConversionResult, Entry};

/// Media type used for text results.
pub const TEXT_MEDIA_TYPE: &str = "text/plain";

/// Extension used when no rule matches.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Ordered `(substring, extension)` rules. First match wins, so a target
/// containing both `json` and `javascript` resolves to `json`.
const EXTENSION_RULES: &[(&str, &str)] = &[
    ("json", "json"),
    ("xml", "xml"),
    ("html", "html"),
    ("javascript", "js"),
    ("python", "py"),
    ("png", "png"),
    ("jpeg", "jpg"),
    ("webp", "webp"),
];

/// A downloadable conversion output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub media_type: String,
}

/// File extension for a target format identifier.
pub fn extension_for(target_format: &str) -> &'static str {
    EXTENSION_RULES
        .iter()
        .find(|(needle, _)| target_format.contains(needle))
        .map(|(_, ext)| *ext)
        .unwrap_or(DEFAULT_EXTENSION)
}

/// Original name up to the first `.`.
fn base_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// `converted_{base}.{ext}` for the given original name and target.
pub fn suggested_file_name(original_name: &str, target_format: &str) -> String {
    format!(
        "converted_{}.{}",
        base_name(original_name),
        extension_for(target_format)
    )
}

/// Build the download artifact for a completed entry.
///
/// Returns `None` if the entry has no result (not COMPLETED).
pub fn resolve_download(entry: &Entry) -> Option<DownloadArtifact> {
    let (bytes, media_type) = match entry.result()? {
        ConversionResult::Text(text) => (text.as_bytes().to_vec(), TEXT_MEDIA_TYPE.to_string()),
        ConversionResult::Binary { bytes, media_type } => (bytes.clone(), media_type.clone()),
    };

    Some(DownloadArtifact {
        bytes,
        file_name: suggested_file_name(&entry.payload.name, &entry.target_format),
        media_type,
    })
}
