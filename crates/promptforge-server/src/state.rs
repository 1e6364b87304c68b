use std::sync::Arc;

use promptforge_config::{OllamaConfig, PublicConfig};
use promptforge_history::{HistoryEntry, HistoryStore};

/// Shared state for API route handlers
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    ollama: OllamaConfig,
    public: PublicConfig,
    history: Option<HistoryStore>,
}

impl AppState {
    pub fn new(ollama: OllamaConfig, public: PublicConfig, history: Option<HistoryStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { ollama, public, history }),
        }
    }

    pub fn ollama(&self) -> &OllamaConfig {
        &self.inner.ollama
    }

    pub fn public_config(&self) -> &PublicConfig {
        &self.inner.public
    }

    pub fn history(&self) -> Option<&HistoryStore> {
        self.inner.history.as_ref()
    }

    /// Append a generation to the history, if enabled
    ///
    /// Failures are logged and never surface to the caller.
    pub async fn record(&self, entry: HistoryEntry) {
        let Some(store) = self.history() else {
            return;
        };

        if let Err(e) = store.add(entry).await {
            tracing::warn!(error = %e, "failed to record history entry");
        }
    }
}
