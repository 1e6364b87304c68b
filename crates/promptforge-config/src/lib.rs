#![allow(clippy::must_use_candidate)]

mod env;
pub mod history;
mod loader;
pub mod ollama;
mod public;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use history::*;
pub use ollama::*;
pub use public::PublicConfig;
pub use server::*;
pub use telemetry::TelemetryConfig;

/// Top-level PromptForge configuration
///
/// Every section has defaults, so an empty file is a valid configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,
    /// Generation history log
    #[serde(default)]
    pub history: HistoryConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
