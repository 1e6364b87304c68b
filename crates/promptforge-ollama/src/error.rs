use http::StatusCode;
use promptforge_core::HttpError;
use thiserror::Error;

/// Errors that can occur while generating text through Ollama
///
/// Every variant is terminal for the call that produced it.
#[derive(Debug, Error)]
pub enum OllamaError {
    /// The server could not be reached, timed out, or dropped the body
    #[error("failed to reach Ollama at {url}: {message}")]
    Connection { url: String, message: String },

    /// The server answered with something other than 200
    #[error("Ollama returned {status}: {body}")]
    HttpStatus {
        status: u16,
        /// Response body, truncated for diagnostics
        body: String,
    },

    /// Neither whole-body nor line-oriented decoding produced any text
    #[error("failed to parse Ollama response as JSON: {0}")]
    Parse(String),
}

impl HttpError for OllamaError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_GATEWAY
    }

    fn error_type(&self) -> &'static str {
        match self {
            Self::Connection { .. } => "connection_error",
            Self::HttpStatus { .. } => "http_status_error",
            Self::Parse(_) => "parse_error",
        }
    }
}
