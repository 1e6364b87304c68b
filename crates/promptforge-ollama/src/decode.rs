//! Payload decoding
//!
//! A body is first parsed as a single JSON value. Only when that fails is it
//! treated as NDJSON, which is what Ollama sends when it streams: one record
//! per line, each holding a fragment of the answer.

pub use promptforge_core::MalformedLinePolicy;
use serde_json::Value;

use crate::error::OllamaError;
use crate::normalize::normalize;
use crate::transport::truncate_chars;

/// Maximum characters of an offending line quoted in a parse error
const LINE_EXCERPT_CHARS: usize = 200;

/// Decode a response body into canonical text
///
/// A whole-body JSON value is normalized and returned as-is. Otherwise each
/// non-blank line is normalized on its own, empty fragments are dropped and
/// the rest are concatenated without a separator, then trimmed.
pub fn decode(body: &str, policy: MalformedLinePolicy) -> Result<String, OllamaError> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => Ok(normalize(&value)),
        Err(whole_body_error) => decode_lines(body, policy, &whole_body_error),
    }
}

fn decode_lines(
    body: &str,
    policy: MalformedLinePolicy,
    whole_body_error: &serde_json::Error,
) -> Result<String, OllamaError> {
    let mut combined = String::new();

    for (index, line) in body.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let line_number = index + 1;
        match serde_json::from_str::<Value>(line) {
            Ok(record) => combined.push_str(&normalize(&record)),
            Err(e) => match policy {
                MalformedLinePolicy::Abort => {
                    tracing::warn!(line = line_number, error = %e, "malformed NDJSON record");
                    return Err(OllamaError::Parse(format!(
                        "line {line_number}: {e}: {}",
                        truncate_chars(line, LINE_EXCERPT_CHARS)
                    )));
                }
                MalformedLinePolicy::Skip => {
                    tracing::debug!(line = line_number, error = %e, "skipping malformed NDJSON record");
                }
            },
        }
    }

    let combined = combined.trim();
    if combined.is_empty() {
        tracing::warn!(error = %whole_body_error, "response body produced no text");
        return Err(OllamaError::Parse(whole_body_error.to_string()));
    }

    Ok(combined.to_owned())
}
