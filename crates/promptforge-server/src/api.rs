//! JSON API consumed by the frontend

use axum::extract::State;
use axum::response::Response;
use axum::{Json, Router, routing};
use http::StatusCode;
use promptforge_core::{CraftFields, HttpError};
use promptforge_history::HistoryEntry;
use promptforge_ollama::GenerationRequest;
use serde::{Deserialize, Serialize};

use crate::response;
use crate::state::AppState;

const NOT_ENOUGH_INFORMATION: &str = "Not enough information is given.";

/// Body of `POST /api/generate`
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(flatten)]
    pub fields: CraftFields,
    /// Model override; the configured default is used when absent or blank
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateData {
    crafted_prompt: String,
    ollama_response: String,
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", routing::post(generate))
        .route("/api/config", routing::get(config))
        .route("/api/history", routing::get(history))
        .with_state(state)
}

/// Handle `POST /api/generate`
async fn generate(State(state): State<AppState>, Json(request): Json<GenerateRequest>) -> Response {
    let Some(crafted_prompt) = request.fields.assemble() else {
        tracing::debug!("crafted prompt is empty");
        return response::failure(StatusCode::BAD_REQUEST, NOT_ENOUGH_INFORMATION);
    };

    let ollama = state.ollama();
    let model = ollama.model_or_default(request.model.as_deref()).to_owned();
    let generation = GenerationRequest::new(crafted_prompt.as_str(), model.as_str(), ollama.max_tokens, ollama.timeout);

    match promptforge_ollama::generate_with_policy(&generation, ollama.url.as_str(), ollama.malformed_lines).await {
        Ok(ollama_response) => {
            state
                .record(HistoryEntry::now(model, crafted_prompt.as_str(), ollama_response.as_str()))
                .await;

            response::success(GenerateData {
                crafted_prompt,
                ollama_response,
            })
        }
        Err(e) => {
            tracing::warn!(%model, error_type = e.error_type(), error = %e, "generation failed");
            response::from_error(&e)
        }
    }
}

/// Handle `GET /api/config`
async fn config(State(state): State<AppState>) -> Response {
    response::success(state.public_config())
}

/// Handle `GET /api/history`
async fn history(State(state): State<AppState>) -> Response {
    match state.history() {
        Some(store) => response::success(store.list().await),
        None => response::failure(StatusCode::NOT_FOUND, "history API is disabled"),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use http::Request;
    use promptforge_config::Config;
    use tower::ServiceExt;

    use super::*;

    fn test_state() -> AppState {
        let config = Config::default();
        let public = config.public_view();
        AppState::new(config.ollama, public, None)
    }

    async fn call(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = api_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn generate_request_accepts_partial_bodies() {
        let request: GenerateRequest = serde_json::from_str(r#"{"title": "t", "model": "llama3.2:3b"}"#).unwrap();
        assert_eq!(request.fields.title, "t");
        assert_eq!(request.model.as_deref(), Some("llama3.2:3b"));

        let request: GenerateRequest = serde_json::from_str("{}").unwrap();
        assert!(request.fields.is_blank());
        assert!(request.model.is_none());
    }

    #[tokio::test]
    async fn blank_fields_are_rejected_before_calling_upstream() {
        let request = Request::post("/api/generate")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"title": "  ", "context": ""}"#))
            .unwrap();

        let (status, body) = call(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"ok": false, "error": NOT_ENOUGH_INFORMATION}));
    }

    #[tokio::test]
    async fn config_is_wrapped_in_envelope() {
        let (status, body) = call(Request::get("/api/config").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["data"]["default_model"], "gpt-oss:20b");
        assert_eq!(body["data"]["port"], 11435);
    }

    #[tokio::test]
    async fn history_is_not_found_when_disabled() {
        let (status, body) = call(Request::get("/api/history").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["ok"], false);
    }
}
