use crate::category::Category;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("File too large: {name} is {size} bytes (limit {limit} bytes)")]
    FileTooLarge { name: String, size: u64, limit: u64 },
}

/// Per-entry conversion failure.
///
/// Every variant is contained at the entry level: the dispatcher stores
/// its message on the entry and moves on to the next one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("Unsupported file type")]
    UnsupportedFileType,

    #[error("Unknown conversion path for {category} -> {target}")]
    UnknownConversionPath { category: Category, target: String },

    /// Network, quota or malformed-response failure from the inference service.
    #[error("{0}")]
    Service(String),

    /// Input bytes could not be decoded as an image.
    #[error("Failed to load image: {0}")]
    Decode(String),

    /// Target format is not supported by the codec, or encoding failed.
    #[error("Conversion failed: {0}")]
    Encode(String),
}
