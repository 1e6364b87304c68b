use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use promptforge_telemetry::LogFormat;

/// PromptForge prompt crafting server
#[derive(Debug, Parser)]
#[command(name = "promptforge", about = "Craft prompts and run them through a local Ollama server")]
pub struct Args {
    /// Path to configuration file (defaults to ~/.promptforge/config.toml when present)
    #[arg(short, long, env = "PROMPTFORGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "PROMPTFORGE_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter directive
    #[arg(long, default_value = "info", env = "PROMPTFORGE_LOG")]
    pub log: String,

    /// Emit log lines as JSON objects
    #[arg(long, env = "PROMPTFORGE_LOG_JSON")]
    pub log_json: bool,
}

impl Args {
    pub const fn log_format(&self) -> LogFormat {
        if self.log_json { LogFormat::Json } else { LogFormat::Text }
    }
}
