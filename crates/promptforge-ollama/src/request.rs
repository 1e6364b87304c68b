//! Generation request construction and the end-to-end `generate` call

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::decode::{MalformedLinePolicy, decode};
use crate::error::OllamaError;
use crate::transport;

/// Path of the generation endpoint, relative to the server base URL
pub const GENERATE_PATH: &str = "/api/generate";

/// One generation call: what to ask, which model, and how long to wait
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    prompt: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

/// Wire body sent to Ollama
#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, model: impl Into<String>, max_tokens: u32, timeout: Duration) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            max_tokens,
            timeout,
        }
    }

    /// Same as [`GenerationRequest::new`] with the timeout in milliseconds
    pub fn with_timeout_ms(prompt: impl Into<String>, model: impl Into<String>, max_tokens: u32, timeout_ms: u64) -> Self {
        Self::new(prompt, model, max_tokens, Duration::from_millis(timeout_ms))
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub const fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn body(&self) -> GenerateBody<'_> {
        GenerateBody {
            model: &self.model,
            prompt: &self.prompt,
            max_tokens: self.max_tokens,
        }
    }
}

/// Build the generation URL from a server base URL
pub fn generate_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    format!("{base}{GENERATE_PATH}")
}

/// Ask Ollama to generate text and return it as one canonical string
///
/// Malformed NDJSON records abort the call.
pub async fn generate(request: &GenerationRequest, base_url: &str) -> Result<String, OllamaError> {
    generate_with_policy(request, base_url, MalformedLinePolicy::Abort).await
}

/// [`generate`] with an explicit policy for malformed NDJSON records
///
/// Performs exactly one request; a fresh client is built per call so no
/// connection state outlives it.
pub async fn generate_with_policy(
    request: &GenerationRequest,
    base_url: &str,
    policy: MalformedLinePolicy,
) -> Result<String, OllamaError> {
    let url = generate_url(base_url);

    let client = reqwest::Client::builder()
        .timeout(request.timeout)
        .build()
        .map_err(|e| transport::connection_error(&url, &e))?;

    tracing::debug!(
        %url,
        model = %request.model,
        max_tokens = request.max_tokens,
        prompt_chars = request.prompt.chars().count(),
        "sending generation request"
    );

    let builder = client
        .post(&url)
        .header(CONTENT_TYPE, "application/json")
        .json(&request.body());

    let raw = transport::send(builder, &url).await?;
    let body = transport::check_status(raw)?;
    let text = decode(&body, policy)?;

    tracing::debug!(model = %request.model, response_chars = text.chars().count(), "generation complete");

    Ok(text)
}
