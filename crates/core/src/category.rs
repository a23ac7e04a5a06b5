//! File categorization.
//!
//! Maps a file's declared media type and name onto the coarse
//! [`Category`] that selects its conversion options. Rules are checked
//! in priority order and the first match wins.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse file kind used to select a conversion option set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Image,
    Audio,
    TextCode,
    Pdf,
    Unknown,
}

impl Category {
    /// Upper-case label matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Image => "IMAGE",
            Category::Audio => "AUDIO",
            Category::TextCode => "TEXT_CODE",
            Category::Pdf => "PDF",
            Category::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PDF media type. Checked before any prefix rule.
pub const MEDIA_TYPE_PDF: &str = "application/pdf";

/// File name suffixes treated as text/code regardless of media type.
const TEXT_CODE_EXTENSIONS: &[&str] = &[".ts", ".py", ".md"];

/// Categorize a file from its declared media type and name.
///
/// Total and deterministic: anything that matches no rule is
/// [`Category::Unknown`].
pub fn categorize(media_type: &str, file_name: &str) -> Category {
    if media_type == MEDIA_TYPE_PDF {
        Category::Pdf
    } else if media_type.starts_with("image/") {
        Category::Image
    } else if media_type.starts_with("audio/") {
        Category::Audio
    } else if is_text_or_code(media_type, file_name) {
        Category::TextCode
    } else {
        Category::Unknown
    }
}

fn is_text_or_code(media_type: &str, file_name: &str) -> bool {
    media_type.starts_with("text/")
        || media_type.contains("json")
        || media_type.contains("javascript")
        || TEXT_CODE_EXTENSIONS
            .iter()
            .any(|ext| file_name.ends_with(ext))
}
