//! Fake model gateway for testing.
//!
//! Returns scripted responses without touching the network and records
//! every prompt it receives, so tests can assert on call arguments.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenError, ModelGateway, OutputFormat};

enum Script {
    Resolve(String),
    Reject(GenErrorKind),
}

/// Owned mirror of [`GenError`] so scripted rejections can be replayed on
/// every call.
enum GenErrorKind {
    Network(String),
    Api { status: u16, message: String },
}

/// A scripted gateway that records prompts.
pub struct FakeModel {
    script: Script,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    /// Resolve every call with the given text.
    pub fn resolving(response: &str) -> Self {
        Self {
            script: Script::Resolve(response.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Reject every call with a network failure carrying this message.
    pub fn rejecting(message: &str) -> Self {
        Self {
            script: Script::Reject(GenErrorKind::Network(message.to_string())),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Reject every call with a non-2xx API error.
    pub fn rejecting_with_status(status: u16, message: &str) -> Self {
        Self {
            script: Script::Reject(GenErrorKind::Api {
                status,
                message: message.to_string(),
            }),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// All prompts received so far, in call order.
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelGateway for FakeModel {
    async fn generate(&self, prompt: &str, _format: OutputFormat) -> Result<String, GenError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        match &self.script {
            Script::Resolve(response) => Ok(response.clone()),
            Script::Reject(GenErrorKind::Network(message)) => {
                Err(GenError::Network(message.clone()))
            }
            Script::Reject(GenErrorKind::Api { status, message }) => Err(GenError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolving_records_prompts() {
        let fake = FakeModel::resolving("ok");
        let out = fake.generate("first", OutputFormat::Text).await.unwrap();
        assert_eq!(out, "ok");
        fake.generate("second", OutputFormat::Json).await.unwrap();
        assert_eq!(fake.recorded_prompts(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_rejecting_surfaces_message() {
        let fake = FakeModel::rejecting("connection refused");
        let err = fake.generate("x", OutputFormat::Text).await.unwrap_err();
        assert_eq!(err.to_string(), "request failed: connection refused");
    }

    #[tokio::test]
    async fn test_rejecting_with_status() {
        let fake = FakeModel::rejecting_with_status(503, "overloaded");
        let err = fake.generate("x", OutputFormat::Json).await.unwrap_err();
        assert!(matches!(err, GenError::Api { status: 503, .. }));
    }
}
