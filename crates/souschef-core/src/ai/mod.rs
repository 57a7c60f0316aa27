//! Model gateway abstraction over the generative-language endpoint.
//!
//! The gateway sends a finished prompt and hands back raw text; parsing is
//! the caller's job. A scripted [`FakeModel`] stands in for the real client
//! in tests.

mod fake;
mod gemini;

pub use fake::FakeModel;
pub use gemini::GeminiClient;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for generation operations.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("{0}")]
    Validation(String),

    #[error("request failed: {0}")]
    Network(String),

    #[error("API returned error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("gateway not configured: {0}")]
    NotConfigured(String),
}

/// Output shape to request from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Freeform text (markdown allowed).
    Text,
    /// Provider-enforced strict JSON. The gateway only requests the mode;
    /// it does not validate schema conformance.
    Json,
}

/// Trait for the model gateway.
///
/// Implementations should be cheap to clone behind an `Arc` and safe to
/// call from spawned tasks.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send a prompt and return the model's raw text response.
    async fn generate(&self, prompt: &str, format: OutputFormat) -> Result<String, GenError>;

    /// The model identifier requests are billed against.
    fn model_name(&self) -> &str;
}
