//! REST API client for the Gemini `generateContent` endpoint.
//!
//! Wraps the HTTP call using [`reqwest`]. Authentication uses the
//! `x-goog-api-key` header.

use crate::messages::{parse_error_message, GenerateContentRequest, GenerateContentResponse};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiApi {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

/// Errors from the Gemini REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    /// No API key configured. Raised before any request is sent.
    #[error("Gemini API key is not configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    /// The HTTP request itself failed (network, DNS, TLS, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Gemini returned a non-2xx status code.
    #[error("Gemini API error ({status}): {message}")]
    ApiError {
        status: u16,
        /// Message from the error envelope, or the raw body.
        message: String,
    },
}

impl GeminiApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Base URL, e.g. `https://generativelanguage.googleapis.com`.
    pub fn new(api_url: String, api_key: Option<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, api_key)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Run a single `generateContent` call against `model`.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiApiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiApiError::MissingApiKey)?;

        tracing::debug!(model, "Sending generateContent request");

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.api_url, model
            ))
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. On failure the
    /// error envelope message (or raw body) is captured.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GeminiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let message = parse_error_message(&body).unwrap_or(body);
            return Err(GeminiApiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GeminiApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
