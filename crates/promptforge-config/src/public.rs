use serde::Serialize;

use crate::Config;

/// Configuration as exposed at `GET /api/config`
#[derive(Debug, Serialize)]
pub struct PublicConfig {
    pub bind: String,
    pub port: u16,
    pub ollama_url: String,
    pub default_model: String,
    pub max_tokens: u32,
    pub timeout_ms: u64,
    pub enable_history_api: bool,
    pub history_file: String,
}

impl Config {
    /// Settings that are safe to show to the frontend
    pub fn public_view(&self) -> PublicConfig {
        PublicConfig {
            bind: self.server.listen_address.ip().to_string(),
            port: self.server.listen_address.port(),
            ollama_url: self.ollama.url.to_string(),
            default_model: self.ollama.default_model.clone(),
            max_tokens: self.ollama.max_tokens,
            timeout_ms: u64::try_from(self.ollama.timeout.as_millis()).unwrap_or(u64::MAX),
            enable_history_api: self.history.enabled,
            history_file: self.history.resolved_path().display().to_string(),
        }
    }
}
