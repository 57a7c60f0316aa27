use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{GenError, ModelGateway, OutputFormat};

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiResponseContent {
    parts: Vec<GeminiResponsePart>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

/// Client for the Gemini `generateContent` endpoint.
///
/// Each call is metered externally; there is no retry, backoff, or request
/// coalescing here.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    pub fn with_model(api_key: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Build a client from `GEMINI_API_KEY`, with `GEMINI_MODEL` as an
    /// optional model override.
    pub fn from_env() -> Result<Self, GenError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GenError::NotConfigured("GEMINI_API_KEY not set".to_string()))?;
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::with_model(&api_key, &model))
    }
}

#[async_trait]
impl ModelGateway for GeminiClient {
    async fn generate(&self, prompt: &str, format: OutputFormat) -> Result<String, GenError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            API_BASE, self.model, self.api_key
        );

        let generation_config = match format {
            OutputFormat::Text => None,
            OutputFormat::Json => Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
            }),
        };

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config,
        };

        tracing::debug!(model = %self.model, format = ?format, "calling generative endpoint");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status, "generative endpoint returned error");
            return Err(GenError::Api { status, message });
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenError::Parse(e.to_string()))?;

        gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.text.clone())
            .ok_or_else(|| GenError::Parse("no text content in response".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_mode_sets_response_mime_type() {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: "hi".to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
            }),
        };
        let body = serde_json::to_string(&request).unwrap();
        assert!(body.contains("\"responseMimeType\":\"application/json\""));
    }

    #[test]
    fn test_text_mode_omits_generation_config() {
        let request = GeminiRequest {
            contents: vec![],
            generation_config: None,
        };
        let body = serde_json::to_string(&request).unwrap();
        assert!(!body.contains("generationConfig"));
    }

    #[test]
    fn test_from_env_without_key() {
        // The variable may be set in a developer shell; only assert when absent.
        if std::env::var("GEMINI_API_KEY").is_err() {
            assert!(matches!(
                GeminiClient::from_env(),
                Err(GenError::NotConfigured(_))
            ));
        }
    }
}
