//! Gemini REST client and inference service.
//!
//! Provides typed request/response bodies for the `generateContent`
//! endpoint, an HTTP wrapper, per-modality prompt selection, and the
//! [`GeminiInference`] implementation of the core
//! [`InferenceService`](omniconvert_core::converter::InferenceService) trait.

pub mod api;
pub mod config;
pub mod messages;
pub mod prompts;
pub mod service;

pub use api::{GeminiApi, GeminiApiError};
pub use config::{GeminiConfig, ModelConfig};
pub use service::GeminiInference;
