//! Generation history log
//!
//! A single JSON array on disk, newest entry first, capped at a fixed
//! number of entries. The whole file is rewritten on every append.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

use std::path::{Path, PathBuf};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors raised while writing the history file
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One recorded generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: Timestamp,
    pub model: String,
    pub crafted_prompt: String,
    pub response: String,
}

impl HistoryEntry {
    /// Entry stamped with the current time
    pub fn now(model: impl Into<String>, crafted_prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            timestamp: Timestamp::now(),
            model: model.into(),
            crafted_prompt: crafted_prompt.into(),
            response: response.into(),
        }
    }
}

/// Append-only, size-capped history backed by a JSON file
pub struct HistoryStore {
    path: PathBuf,
    max_entries: usize,
    // Serializes read-modify-write cycles across concurrent requests
    lock: Mutex<()>,
}

impl HistoryStore {
    /// Open the store, creating the parent directory and an empty file if needed
    pub async fn open(path: impl Into<PathBuf>, max_entries: usize) -> Result<Self, HistoryError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|source| HistoryError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let store = Self {
            path,
            max_entries,
            lock: Mutex::new(()),
        };

        if !tokio::fs::try_exists(&store.path).await.unwrap_or(false) {
            store.write(&[]).await?;
        }

        tracing::debug!(path = %store.path.display(), max_entries, "history store opened");

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record an entry as the newest one, dropping the oldest past the cap
    pub async fn add(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().await;

        let mut entries = self.read().await;
        entries.insert(0, entry);
        entries.truncate(self.max_entries);

        self.write(&entries).await
    }

    /// All entries, newest first
    ///
    /// A missing or corrupt file reads as an empty history.
    pub async fn list(&self) -> Vec<HistoryEntry> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    async fn read(&self) -> Vec<HistoryEntry> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read history");
                return Vec::new();
            }
        };

        serde_json::from_slice(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "history file is corrupt, starting over");
            Vec::new()
        })
    }

    async fn write(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let json = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&self.path, json).await.map_err(|source| HistoryError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
