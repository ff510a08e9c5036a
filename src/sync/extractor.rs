use ahash::AHashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::watcher::SessionId;

/// What the page's editor held at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSource {
    pub code: String,
    pub language_label: String,
    pub difficulty: Option<String>,
}

impl ExtractedSource {
    /// Missing code or language aborts the run without reporting.
    pub fn is_empty(&self) -> bool {
        self.code.trim().is_empty() || self.language_label.trim().is_empty()
    }
}

/// Reads the accepted source out of a page. How that happens is up to the host.
#[async_trait]
pub trait SourceExtractor: Send + Sync {
    async fn extract(&self, page: &SessionId) -> Option<ExtractedSource>;
}

/// Serves the latest editor snapshot the host pushed for each session.
#[derive(Default)]
pub struct SnapshotExtractor {
    snapshots: RwLock<AHashMap<SessionId, ExtractedSource>>,
}

impl SnapshotExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put(&self, page: SessionId, source: ExtractedSource) {
        self.snapshots.write().await.insert(page, source);
    }

    pub async fn forget(&self, page: &SessionId) {
        self.snapshots.write().await.remove(page);
    }
}

#[async_trait]
impl SourceExtractor for SnapshotExtractor {
    async fn extract(&self, page: &SessionId) -> Option<ExtractedSource> {
        self.snapshots.read().await.get(page).cloned()
    }
}
