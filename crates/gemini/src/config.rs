/// Default public Gemini endpoint.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_AUDIO_MODEL: &str = "gemini-2.5-flash-native-audio-preview-09-2025";
pub const DEFAULT_DOCUMENT_MODEL: &str = "gemini-3-flash-preview";

/// Model used for each input modality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub text: String,
    pub image: String,
    pub audio: String,
    pub document: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT_MODEL.into(),
            image: DEFAULT_IMAGE_MODEL.into(),
            audio: DEFAULT_AUDIO_MODEL.into(),
            document: DEFAULT_DOCUMENT_MODEL.into(),
        }
    }
}

/// Gemini client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL without trailing slash.
    pub api_url: String,
    /// `None` when no key is configured; requests then fail without
    /// reaching the network.
    pub api_key: Option<String>,
    pub models: ModelConfig,
}

impl GeminiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                                       |
    /// |-------------------------|-----------------------------------------------|
    /// | `GEMINI_API_KEY`        | falls back to `API_KEY`, else unset           |
    /// | `GEMINI_API_URL`        | `https://generativelanguage.googleapis.com`   |
    /// | `GEMINI_TEXT_MODEL`     | `gemini-3-flash-preview`                      |
    /// | `GEMINI_IMAGE_MODEL`    | `gemini-2.5-flash-image`                      |
    /// | `GEMINI_AUDIO_MODEL`    | `gemini-2.5-flash-native-audio-preview-09-2025` |
    /// | `GEMINI_DOCUMENT_MODEL` | `gemini-3-flash-preview`                      |
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let api_url = std::env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.into())
            .trim_end_matches('/')
            .to_string();

        let models = ModelConfig {
            text: env_or("GEMINI_TEXT_MODEL", DEFAULT_TEXT_MODEL),
            image: env_or("GEMINI_IMAGE_MODEL", DEFAULT_IMAGE_MODEL),
            audio: env_or("GEMINI_AUDIO_MODEL", DEFAULT_AUDIO_MODEL),
            document: env_or("GEMINI_DOCUMENT_MODEL", DEFAULT_DOCUMENT_MODEL),
        };

        Self {
            api_url,
            api_key,
            models,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
