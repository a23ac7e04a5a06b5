//! Collaborator traits for the conversion paths.
//!
//! The dispatcher only sees these seams. Concrete implementations live
//! in `omniconvert-codec` (local re-encode) and `omniconvert-gemini`
//! (remote inference).

use async_trait::async_trait;

use crate::entry::{ConversionResult, FilePayload};
use crate::error::ConversionError;

/// Quality factor for lossy local encodes.
pub const LOSSY_ENCODE_QUALITY: f32 = 0.92;

/// Local image decode + re-encode.
#[async_trait]
pub trait ImageReencoder: Send + Sync {
    /// Decode `payload` as an image and encode it as `target_mime`.
    ///
    /// Fails with [`ConversionError::Decode`] when the input is not a
    /// decodable image and [`ConversionError::Encode`] when the target is
    /// unsupported.
    async fn reencode(
        &self,
        payload: &FilePayload,
        target_mime: &str,
    ) -> Result<ConversionResult, ConversionError>;
}

/// Remote generative inference, one method per input modality.
///
/// Every failure is reported as [`ConversionError::Service`].
#[async_trait]
pub trait InferenceService: Send + Sync {
    async fn infer_from_image(
        &self,
        payload: &FilePayload,
        target_format: &str,
    ) -> Result<String, ConversionError>;

    async fn infer_from_audio(
        &self,
        payload: &FilePayload,
        target_format: &str,
    ) -> Result<String, ConversionError>;

    /// `text` is the payload already decoded as UTF-8.
    async fn infer_from_text(
        &self,
        text: &str,
        target_format: &str,
    ) -> Result<String, ConversionError>;

    async fn infer_from_document(
        &self,
        payload: &FilePayload,
        target_format: &str,
    ) -> Result<String, ConversionError>;
}
