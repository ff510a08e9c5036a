use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordOutcome {
    Success,
    Error,
}

/// Outcome of the most recent pipeline completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub outcome: RecordOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SyncRecord {
    pub fn success(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            timestamp: Utc::now(),
            outcome: RecordOutcome::Success,
            message: None,
        }
    }

    pub fn error(path: Option<String>, message: impl Into<String>) -> Self {
        Self {
            path,
            timestamp: Utc::now(),
            outcome: RecordOutcome::Error,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == RecordOutcome::Success
    }
}

/// Single-slot holder of the latest [`SyncRecord`], optionally mirrored to a JSON file.
#[derive(Clone, Default)]
pub struct ResultReporter {
    slot: Arc<RwLock<Option<SyncRecord>>>,
    status_file: Option<PathBuf>,
}

impl ResultReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the slot from `status_file` when it holds a readable record.
    pub async fn with_status_file(status_file: PathBuf) -> Self {
        let restored = match tokio::fs::read(&status_file).await {
            Ok(bytes) => match serde_json::from_slice::<SyncRecord>(&bytes) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(
                        path = %status_file.display(),
                        error = %e,
                        "Ignoring unreadable status file"
                    );
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %status_file.display(), error = %e, "Failed to read status file");
                None
            }
        };
        if let Some(record) = &restored {
            debug!(outcome = ?record.outcome, path = ?record.path, "Restored latest sync status");
        }

        Self {
            slot: Arc::new(RwLock::new(restored)),
            status_file: Some(status_file),
        }
    }

    /// Overwrites the slot. Persistence failures are logged, never surfaced.
    ///
    /// The slot stays locked until the file is written, so the file always mirrors the slot.
    pub async fn record(&self, record: SyncRecord) {
        let mut slot = self.slot.write().await;

        if let Some(path) = &self.status_file {
            let result = match serde_json::to_vec_pretty(&record) {
                Ok(bytes) => tokio::fs::write(path, bytes).await,
                Err(e) => Err(std::io::Error::other(e)),
            };
            if let Err(e) = result {
                warn!(path = %path.display(), error = %e, "Failed to persist sync status");
            }
        }

        *slot = Some(record);
    }

    pub async fn latest(&self) -> Option<SyncRecord> {
        self.slot.read().await.clone()
    }
}
