//! Server-side proxy for the generative endpoint.
//!
//! Mirrors the browser app's single serverless handler: `POST /api/chat`
//! with `{prompt, isJson}` forwards to the model and answers `{text}` on
//! success or `{error}` with a 500 on failure. Wrong methods get the
//! router's 405.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use souschef_core::{GeminiClient, ModelGateway, OutputFormat};

type AppState = Arc<dyn ModelGateway>;

#[derive(Debug, Deserialize)]
struct ChatRequest {
    prompt: String,
    #[serde(default, rename = "isJson")]
    is_json: bool,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    text: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

async fn chat(State(gateway): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    let format = if request.is_json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    match gateway.generate(&request.prompt, format).await {
        Ok(text) => (StatusCode::OK, Json(ChatResponse { text })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn router(gateway: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .with_state(gateway)
}

fn init_telemetry() {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() {
    init_telemetry();

    let gateway: AppState =
        Arc::new(GeminiClient::from_env().expect("GEMINI_API_KEY must be set"));

    let app = router(gateway);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    tracing::info!("Proxy listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use souschef_core::FakeModel;
    use tower::ServiceExt;

    fn chat_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_chat_returns_text() {
        let app = router(Arc::new(FakeModel::resolving("bon appetit")));

        let response = app
            .oneshot(chat_request(r#"{"prompt": "make soup", "isJson": false}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["text"], "bon appetit");
    }

    #[tokio::test]
    async fn test_chat_failure_returns_500_with_error() {
        let app = router(Arc::new(FakeModel::rejecting("quota exceeded")));

        let response = app
            .oneshot(chat_request(r#"{"prompt": "make soup", "isJson": true}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "request failed: quota exceeded");
    }

    #[tokio::test]
    async fn test_wrong_method_is_rejected() {
        let app = router(Arc::new(FakeModel::resolving("unused")));

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/chat")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_is_json_defaults_to_false() {
        let app = router(Arc::new(FakeModel::resolving("ok")));

        let response = app
            .oneshot(chat_request(r#"{"prompt": "hi"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
