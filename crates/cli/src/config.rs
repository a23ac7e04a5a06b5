//! Runtime configuration assembled from arguments and the environment.

use omniconvert_gemini::GeminiConfig;
use omniconvert_pipeline::QueueConfig;

use crate::args::Args;

/// Everything the binary needs to build the queue.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub queue: QueueConfig,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    /// Queue settings come from `args` (which already carry their env
    /// fallbacks); inference settings from [`GeminiConfig::from_env`].
    pub fn load(args: &Args) -> Self {
        Self {
            queue: queue_config(args),
            gemini: GeminiConfig::from_env(),
        }
    }
}

pub fn queue_config(args: &Args) -> QueueConfig {
    QueueConfig {
        max_in_flight: args.max_in_flight.max(1),
        max_file_size_bytes: args.max_file_mb.saturating_mul(1024 * 1024),
    }
}
