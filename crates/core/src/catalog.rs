//! Static conversion option catalog.
//!
//! Each [`Category`] maps to an ordered list of selectable targets. The
//! first entry is the default for newly categorized files. Targets flagged
//! `externally_computed` are produced by the inference service; the rest
//! are computed locally.

use serde::Serialize;

use crate::category::Category;

/// Fallback target when a category has no options.
pub const FALLBACK_TARGET: &str = "text/plain";

/// A selectable conversion target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionOption {
    /// Target format identifier, e.g. `"image/png"` or `"text/summary"`.
    pub value: &'static str,
    /// Short human-readable label.
    pub label: &'static str,
    /// True if the result comes from the inference service.
    pub externally_computed: bool,
    pub description: &'static str,
}

const fn local(
    value: &'static str,
    label: &'static str,
    description: &'static str,
) -> ConversionOption {
    ConversionOption {
        value,
        label,
        externally_computed: false,
        description,
    }
}

const fn external(
    value: &'static str,
    label: &'static str,
    description: &'static str,
) -> ConversionOption {
    ConversionOption {
        value,
        label,
        externally_computed: true,
        description,
    }
}

// ---------------------------------------------------------------------------
// Catalog tables
// ---------------------------------------------------------------------------

const IMAGE_OPTIONS: &[ConversionOption] = &[
    local("image/png", "PNG", "Lossless quality"),
    local("image/jpeg", "JPG", "Smaller file size"),
    local("image/webp", "WEBP", "Web optimized"),
    external("text/description", "Describe Image (AI)", "Generate a detailed caption"),
    external("application/json", "Extract Data (AI)", "Extract text/data to JSON"),
    external("text/html", "To HTML/Code (AI)", "Convert UI mockup to code"),
];

const AUDIO_OPTIONS: &[ConversionOption] = &[
    external("text/transcription", "Transcribe to Text (AI)", "Speech to text"),
    external("text/summary", "Summarize Audio (AI)", "Key points from audio"),
    external("application/json", "Analyze Sentiment (AI)", "Extract sentiment & tone"),
];

const TEXT_CODE_OPTIONS: &[ConversionOption] = &[
    external("application/json", "To JSON", "Structure unstructured text"),
    external("application/xml", "To XML", "Convert format"),
    external("text/yaml", "To YAML", "Convert format"),
    external("text/javascript", "To JavaScript", "Code translation"),
    external("text/x-python", "To Python", "Code translation"),
    external("text/summary", "Summarize", "Shorten content"),
    external("text/plain", "Proofread & Fix", "Grammar & style check"),
];

const PDF_OPTIONS: &[ConversionOption] = &[
    external("text/plain", "Extract Text (AI)", "Raw text content"),
    external("text/markdown", "To Markdown (AI)", "Preserve structure/tables"),
    external("text/summary", "Summarize PDF (AI)", "Concise overview"),
    external("application/json", "Extract Data to JSON (AI)", "Structure document data"),
    external("text/html", "To HTML (AI)", "Web format"),
];

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Ordered conversion options for a category. Empty for [`Category::Unknown`].
pub fn options(category: Category) -> &'static [ConversionOption] {
    match category {
        Category::Image => IMAGE_OPTIONS,
        Category::Audio => AUDIO_OPTIONS,
        Category::TextCode => TEXT_CODE_OPTIONS,
        Category::Pdf => PDF_OPTIONS,
        Category::Unknown => &[],
    }
}

/// Default target for a newly categorized file.
pub fn default_target(category: Category) -> &'static str {
    options(category)
        .first()
        .map(|opt| opt.value)
        .unwrap_or(FALLBACK_TARGET)
}

/// Look up a specific target within a category's options.
pub fn find_option(category: Category, target: &str) -> Option<&'static ConversionOption> {
    options(category).iter().find(|opt| opt.value == target)
}

/// Whether `target` is a selectable value for `category`.
pub fn is_valid_target(category: Category, target: &str) -> bool {
    find_option(category, target).is_some()
}

/// Whether the `(category, target)` pair requires the inference service.
///
/// Targets missing from the catalog are treated as local.
pub fn is_externally_computed(category: Category, target: &str) -> bool {
    find_option(category, target).is_some_and(|opt| opt.externally_computed)
}
