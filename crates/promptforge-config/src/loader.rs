use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from an explicit path, or from `~/.promptforge/config.toml`
    ///
    /// Without an explicit path a missing default file is not an error:
    /// built-in defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected file fails to load
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match crate::env::default_config_path() {
            Some(default_path) if default_path.is_file() => {
                tracing::debug!(path = %default_path.display(), "using default config file");
                Self::load(&default_path)
            }
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_ollama()?;
        self.validate_history()?;
        self.validate_server()?;
        Ok(())
    }

    fn validate_ollama(&self) -> anyhow::Result<()> {
        let ollama = &self.ollama;

        if !matches!(ollama.url.scheme(), "http" | "https") {
            anyhow::bail!("ollama.url must use http or https, got '{}'", ollama.url.scheme());
        }

        if ollama.default_model.trim().is_empty() {
            anyhow::bail!("ollama.default_model must not be empty");
        }

        if ollama.max_tokens == 0 {
            anyhow::bail!("ollama.max_tokens must be greater than 0");
        }

        if ollama.timeout.is_zero() {
            anyhow::bail!("ollama.timeout must be greater than 0");
        }

        Ok(())
    }

    fn validate_history(&self) -> anyhow::Result<()> {
        if self.history.max_entries == 0 {
            anyhow::bail!("history.max_entries must be greater than 0");
        }

        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/', got '{}'", health.path);
        }

        Ok(())
    }
}
