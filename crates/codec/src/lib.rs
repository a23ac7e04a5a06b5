//! Local image re-encoding.
//!
//! [`ImageCodec`] decodes the payload with the `image` crate and encodes
//! it into the requested raster format. Decoding and encoding are CPU
//! bound and run on the blocking pool.

use std::io::Cursor;

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use omniconvert_core::converter::{ImageReencoder, LOSSY_ENCODE_QUALITY};
use omniconvert_core::entry::{ConversionResult, FilePayload};
use omniconvert_core::error::ConversionError;

/// Errors from the local codec.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Input bytes are not a decodable image.
    #[error("{0}")]
    Decode(#[source] image::ImageError),

    /// The requested target media type has no encoder.
    #[error("Unsupported target format: {0}")]
    UnsupportedTarget(String),

    /// The encoder failed on otherwise valid input.
    #[error("{0}")]
    Encode(#[source] image::ImageError),

    /// The blocking task panicked or was cancelled.
    #[error("Codec task failed: {0}")]
    Task(String),
}

impl From<CodecError> for ConversionError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Decode(e) => ConversionError::Decode(e.to_string()),
            other => ConversionError::Encode(other.to_string()),
        }
    }
}

/// Target media types the codec can produce.
const SUPPORTED_TARGETS: &[(&str, ImageFormat)] = &[
    ("image/png", ImageFormat::Png),
    ("image/jpeg", ImageFormat::Jpeg),
    ("image/webp", ImageFormat::WebP),
];

/// Resolve a target media type to an encoder format.
pub fn target_format(target_mime: &str) -> Option<ImageFormat> {
    SUPPORTED_TARGETS
        .iter()
        .find(|(mime, _)| *mime == target_mime)
        .map(|(_, fmt)| *fmt)
}

/// JPEG quality on the 1-100 scale.
fn jpeg_quality() -> u8 {
    (LOSSY_ENCODE_QUALITY * 100.0).round() as u8
}

/// Decode `bytes` and encode as `target_mime`. Synchronous.
pub fn reencode_bytes(bytes: &[u8], target_mime: &str) -> Result<Vec<u8>, CodecError> {
    let format = target_format(target_mime)
        .ok_or_else(|| CodecError::UnsupportedTarget(target_mime.to_string()))?;

    let img = image::load_from_memory(bytes).map_err(CodecError::Decode)?;

    let mut out = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel; transparent pixels flatten to black.
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            let encoder = JpegEncoder::new_with_quality(&mut out, jpeg_quality());
            rgb.write_with_encoder(encoder).map_err(CodecError::Encode)?;
        }
        ImageFormat::WebP => {
            // The WebP encoder accepts only 8-bit RGB(A).
            let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
            rgba.write_to(&mut out, format).map_err(CodecError::Encode)?;
        }
        _ => {
            img.write_to(&mut out, format).map_err(CodecError::Encode)?;
        }
    }

    Ok(out.into_inner())
}

/// [`ImageReencoder`] backed by the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCodec;

impl ImageCodec {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageReencoder for ImageCodec {
    async fn reencode(
        &self,
        payload: &FilePayload,
        target_mime: &str,
    ) -> Result<ConversionResult, ConversionError> {
        let bytes = payload.bytes.clone();
        let target = target_mime.to_string();

        let encoded = tokio::task::spawn_blocking(move || reencode_bytes(&bytes, &target))
            .await
            .map_err(|e| CodecError::Task(e.to_string()))??;

        tracing::debug!(
            file = %payload.name,
            target_format = target_mime,
            input_bytes = payload.size(),
            output_bytes = encoded.len(),
            "Image re-encoded",
        );

        Ok(ConversionResult::Binary {
            bytes: encoded,
            media_type: target_mime.to_string(),
        })
    }
}
