//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use promptforge_config::Config;
use promptforge_core::MalformedLinePolicy;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder pointed at the given Ollama base URL
    pub fn new(ollama_url: &str) -> Self {
        let mut config = Config::default();
        config.server.listen_address = SocketAddr::from(([127, 0, 0, 1], 0));
        config.ollama.url = ollama_url.parse().expect("valid URL");
        config.ollama.default_model = "mock-model".to_owned();
        config.ollama.timeout = Duration::from_secs(5);

        Self { config }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.ollama.timeout = timeout;
        self
    }

    /// Set the malformed NDJSON line policy
    pub fn with_malformed_lines(mut self, policy: MalformedLinePolicy) -> Self {
        self.config.ollama.malformed_lines = policy;
        self
    }

    /// Enable the history log at `path`
    pub fn with_history(mut self, path: &Path, max_entries: usize) -> Self {
        self.config.history.enabled = true;
        self.config.history.path = path.to_path_buf();
        self.config.history.max_entries = max_entries;
        self
    }

    /// Serve the frontend from `dir`
    pub fn with_static_dir(mut self, dir: &Path) -> Self {
        self.config.server.static_dir = dir.to_path_buf();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
