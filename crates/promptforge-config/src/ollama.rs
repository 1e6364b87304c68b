use std::time::Duration;

use promptforge_core::MalformedLinePolicy;
use serde::{Deserialize, Deserializer};
use url::Url;

const DEFAULT_URL: &str = "http://localhost:11434";

/// Upstream Ollama server configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server
    #[serde(default = "default_url")]
    pub url: Url,
    /// Model used when a request does not name one
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Token budget sent with every generation request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout (e.g. "20s", "2m")
    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    /// Handling of NDJSON records that fail to parse
    #[serde(default)]
    pub malformed_lines: MalformedLinePolicy,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            default_model: default_model(),
            max_tokens: default_max_tokens(),
            timeout: default_timeout(),
            malformed_lines: MalformedLinePolicy::default(),
        }
    }
}

impl OllamaConfig {
    /// Model to use for a request, falling back to the configured default
    pub fn model_or_default<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .map(str::trim)
            .filter(|model| !model.is_empty())
            .unwrap_or(&self.default_model)
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    duration_str::parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid duration '{raw}': {e}")))
}

fn default_url() -> Url {
    Url::parse(DEFAULT_URL).expect("valid default URL")
}

fn default_model() -> String {
    "gpt-oss:20b".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_tokens() -> u32 {
    1024
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout() -> Duration {
    Duration::from_secs(20)
}
