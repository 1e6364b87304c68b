use std::path::PathBuf;

use serde::Deserialize;

/// Generation history configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Record generations and expose them at `GET /api/history`
    #[serde(default)]
    pub enabled: bool,
    /// History file; a leading `~/` is resolved against `HOME`
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Number of most recent entries kept
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_path(),
            max_entries: default_max_entries(),
        }
    }
}

impl HistoryConfig {
    /// History file path with `~` expanded
    pub fn resolved_path(&self) -> PathBuf {
        crate::env::expand_home(&self.path)
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("~/.promptforge/history.json")
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_entries() -> usize {
    200
}
