//! Conversion path selection and single-entry conversion.
//!
//! [`select_path`] is the routing table from `(category, target)` to a
//! collaborator. [`Dispatcher::convert`] runs exactly one collaborator
//! call for one entry and never touches the queue store.

use std::fmt;
use std::sync::Arc;

use omniconvert_core::catalog;
use omniconvert_core::category::Category;
use omniconvert_core::converter::{ImageReencoder, InferenceService};
use omniconvert_core::entry::{ConversionResult, Entry};
use omniconvert_core::error::ConversionError;

/// The collaborator a conversion is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionPath {
    LocalReencode,
    ImageInference,
    AudioInference,
    TextInference,
    DocumentInference,
}

impl fmt::Display for ConversionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConversionPath::LocalReencode => "local_reencode",
            ConversionPath::ImageInference => "image_inference",
            ConversionPath::AudioInference => "audio_inference",
            ConversionPath::TextInference => "text_inference",
            ConversionPath::DocumentInference => "document_inference",
        };
        f.write_str(name)
    }
}

/// Route a `(category, target)` pair to its conversion path.
///
/// Image targets flagged as externally computed go to inference; every
/// other image target is re-encoded locally. Audio, text and PDF always
/// go to inference. Anything else has no path.
pub fn select_path(
    category: Category,
    target_format: &str,
) -> Result<ConversionPath, ConversionError> {
    let external = catalog::is_externally_computed(category, target_format);
    match category {
        Category::Image if external => Ok(ConversionPath::ImageInference),
        Category::Image => Ok(ConversionPath::LocalReencode),
        Category::Audio => Ok(ConversionPath::AudioInference),
        Category::TextCode => Ok(ConversionPath::TextInference),
        Category::Pdf => Ok(ConversionPath::DocumentInference),
        Category::Unknown => Err(ConversionError::UnknownConversionPath {
            category,
            target: target_format.to_string(),
        }),
    }
}

/// Holds the collaborators and performs single-entry conversions.
#[derive(Clone)]
pub struct Dispatcher {
    reencoder: Arc<dyn ImageReencoder>,
    inference: Arc<dyn InferenceService>,
}

impl Dispatcher {
    pub fn new(reencoder: Arc<dyn ImageReencoder>, inference: Arc<dyn InferenceService>) -> Self {
        Self {
            reencoder,
            inference,
        }
    }

    /// Convert one entry through its selected path.
    pub async fn convert(&self, entry: &Entry) -> Result<ConversionResult, ConversionError> {
        let path = select_path(entry.category, &entry.target_format)?;
        let payload = entry.payload.as_ref();
        let target = entry.target_format.as_str();

        tracing::debug!(
            entry_id = %entry.id,
            %path,
            target_format = target,
            "Dispatching conversion",
        );

        match path {
            ConversionPath::LocalReencode => self.reencoder.reencode(payload, target).await,
            ConversionPath::ImageInference => self
                .inference
                .infer_from_image(payload, target)
                .await
                .map(ConversionResult::Text),
            ConversionPath::AudioInference => self
                .inference
                .infer_from_audio(payload, target)
                .await
                .map(ConversionResult::Text),
            ConversionPath::TextInference => {
                let text = String::from_utf8_lossy(&payload.bytes);
                self.inference
                    .infer_from_text(&text, target)
                    .await
                    .map(ConversionResult::Text)
            }
            ConversionPath::DocumentInference => self
                .inference
                .infer_from_document(payload, target)
                .await
                .map(ConversionResult::Text),
        }
    }
}
