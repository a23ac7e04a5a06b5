//! [`InferenceService`] backed by the Gemini API.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use omniconvert_core::category::MEDIA_TYPE_PDF;
use omniconvert_core::converter::InferenceService;
use omniconvert_core::entry::FilePayload;
use omniconvert_core::error::ConversionError;

use crate::api::{GeminiApi, GeminiApiError};
use crate::config::{GeminiConfig, ModelConfig};
use crate::messages::GenerateContentRequest;
use crate::prompts;

/// Returned when the model produces no text, per modality.
pub const EMPTY_TEXT_RESULT: &str = "No response generated.";
pub const EMPTY_AUDIO_RESULT: &str = "No transcript generated.";
pub const EMPTY_IMAGE_RESULT: &str = "No analysis generated.";
pub const EMPTY_DOCUMENT_RESULT: &str = "No result generated.";

impl From<GeminiApiError> for ConversionError {
    fn from(err: GeminiApiError) -> Self {
        ConversionError::Service(err.to_string())
    }
}

/// Gemini-backed inference for every input modality.
#[derive(Debug, Clone)]
pub struct GeminiInference {
    api: GeminiApi,
    models: ModelConfig,
}

impl GeminiInference {
    pub fn new(api: GeminiApi, models: ModelConfig) -> Self {
        Self { api, models }
    }

    pub fn from_config(config: &GeminiConfig) -> Self {
        Self::new(
            GeminiApi::new(config.api_url.clone(), config.api_key.clone()),
            config.models.clone(),
        )
    }

    async fn run(
        &self,
        model: &str,
        request: GenerateContentRequest,
        empty_fallback: &str,
    ) -> Result<String, ConversionError> {
        let response = self.api.generate_content(model, &request).await?;
        Ok(response
            .text()
            .unwrap_or_else(|| empty_fallback.to_string()))
    }
}

fn encode(payload: &FilePayload) -> String {
    STANDARD.encode(&payload.bytes)
}

#[async_trait]
impl InferenceService for GeminiInference {
    async fn infer_from_image(
        &self,
        payload: &FilePayload,
        target_format: &str,
    ) -> Result<String, ConversionError> {
        let request = GenerateContentRequest::inline(
            payload.media_type.clone(),
            encode(payload),
            prompts::image_instruction(target_format),
        );
        self.run(&self.models.image, request, EMPTY_IMAGE_RESULT).await
    }

    async fn infer_from_audio(
        &self,
        payload: &FilePayload,
        target_format: &str,
    ) -> Result<String, ConversionError> {
        let request = GenerateContentRequest::inline(
            payload.media_type.clone(),
            encode(payload),
            prompts::audio_instruction(target_format),
        );
        self.run(&self.models.audio, request, EMPTY_AUDIO_RESULT).await
    }

    async fn infer_from_text(
        &self,
        text: &str,
        target_format: &str,
    ) -> Result<String, ConversionError> {
        let request = GenerateContentRequest::text(prompts::text_request(target_format, text));
        self.run(&self.models.text, request, EMPTY_TEXT_RESULT).await
    }

    async fn infer_from_document(
        &self,
        payload: &FilePayload,
        target_format: &str,
    ) -> Result<String, ConversionError> {
        let request = GenerateContentRequest::inline(
            MEDIA_TYPE_PDF,
            encode(payload),
            prompts::document_instruction(target_format),
        );
        self.run(&self.models.document, request, EMPTY_DOCUMENT_RESULT)
            .await
    }
}
