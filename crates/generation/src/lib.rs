//! Client for the hosted text-generation provider.
//!
//! Provides the [`TextGenerator`] seam the lesson workflow depends on, a
//! Bedrock Converse implementation ([`api::BedrockClient`]), the request and
//! response message shapes, and environment-driven configuration.

pub mod api;
pub mod config;
pub mod messages;

use async_trait::async_trait;

pub use api::BedrockClient;
pub use config::GenerationConfig;

/// Errors from the generation layer.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Configuration could not be turned into a working client.
    #[error("Invalid generation config: {0}")]
    Config(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status (auth, quota, throttling...).
    #[error("Generation provider error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response arrived but carried no completion text where expected.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Something that turns one prompt into one text completion.
///
/// One blocking round trip per call; no retries, no streaming.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
