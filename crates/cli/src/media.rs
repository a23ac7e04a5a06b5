//! Media type inference for files read from disk.

use std::path::Path;

use anyhow::Context;
use omniconvert_core::entry::FilePayload;

/// Media type used when the extension is not recognized.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Extension (lower-case, no dot) to media type, as a browser would
/// report it. `.ts` maps to the MPEG transport stream type; categorization
/// still treats it as source code by name.
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("m4a", "audio/mp4"),
    ("flac", "audio/flac"),
    ("pdf", "application/pdf"),
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("csv", "text/csv"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("xml", "application/xml"),
    ("yaml", "text/yaml"),
    ("yml", "text/yaml"),
    ("json", "application/json"),
    ("js", "text/javascript"),
    ("ts", "video/mp2t"),
    ("py", "text/x-python"),
];

/// Media type for `path` from its extension.
pub fn media_type_for(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return OCTET_STREAM;
    };
    let ext = ext.to_ascii_lowercase();
    MEDIA_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, media_type)| *media_type)
        .unwrap_or(OCTET_STREAM)
}

/// Read a file into a [`FilePayload`] named after its final path component.
pub async fn load_payload(path: &Path) -> anyhow::Result<FilePayload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(FilePayload::new(name, media_type_for(path), bytes))
}
