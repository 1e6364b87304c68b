//! Transport-level classification
//!
//! Connection failures and non-success statuses are turned into errors here,
//! before anything tries to interpret the body.

use reqwest::{RequestBuilder, StatusCode};

use crate::error::OllamaError;

/// Maximum characters of an error body kept in [`OllamaError::HttpStatus`]
pub const ERROR_BODY_CHARS: usize = 500;

/// Status code and body of one upstream round trip
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Send a prepared request and read the whole body
///
/// Failing to connect, timing out, or failing to read the body are all
/// reported as [`OllamaError::Connection`] against `url`.
pub async fn send(builder: RequestBuilder, url: &str) -> Result<RawResponse, OllamaError> {
    let response = builder.send().await.map_err(|e| connection_error(url, &e))?;
    let status = response.status();
    let bytes = response.bytes().await.map_err(|e| connection_error(url, &e))?;

    Ok(RawResponse {
        status,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// Pass the body through if the upstream answered 200
pub fn check_status(raw: RawResponse) -> Result<String, OllamaError> {
    if raw.status == StatusCode::OK {
        return Ok(raw.body);
    }

    tracing::warn!(status = %raw.status, "Ollama returned an error status");
    Err(OllamaError::HttpStatus {
        status: raw.status.as_u16(),
        body: truncate_chars(&raw.body, ERROR_BODY_CHARS).to_owned(),
    })
}

pub(crate) fn connection_error(url: &str, error: &reqwest::Error) -> OllamaError {
    tracing::error!(%url, error = %error, "Ollama request failed");
    OllamaError::Connection {
        url: url.to_owned(),
        message: error.to_string(),
    }
}

/// Cut `s` to at most `max` characters without splitting a code point
pub fn truncate_chars(s: &str, max: usize) -> &str {
    s.char_indices().nth(max).map_or(s, |(end, _)| &s[..end])
}
