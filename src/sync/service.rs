use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use super::{SourceExtractor, SubmissionEvent, SyncOutcome, SyncPipeline};
use crate::config::SourceConfig;
use crate::error::{SyncError, VerifyError};
use crate::watcher::{AcceptedEvent, SessionId};

/// Glue between the watchers and the pipeline: turns an accepted verdict into a
/// [`SubmissionEvent`] by pulling the page's source.
pub struct SyncService {
    pipeline: Arc<SyncPipeline>,
    extractor: Arc<dyn SourceExtractor>,
    source: SourceConfig,
}

impl SyncService {
    pub fn new(
        pipeline: Arc<SyncPipeline>,
        extractor: Arc<dyn SourceExtractor>,
        source: SourceConfig,
    ) -> Self {
        Self {
            pipeline,
            extractor,
            source,
        }
    }

    pub fn pipeline(&self) -> &Arc<SyncPipeline> {
        &self.pipeline
    }

    pub async fn on_accepted(&self, page: &SessionId, accepted: AcceptedEvent) -> SyncOutcome {
        let extracted = self
            .extractor
            .extract(page)
            .await
            .filter(|source| !source.is_empty());
        let Some(extracted) = extracted else {
            let reason = SyncError::ExtractionEmpty.to_string();
            debug!(%page, slug = %accepted.slug, "No source to sync");
            return SyncOutcome::Skipped { reason };
        };

        info!(
            %page,
            slug = %accepted.slug,
            result_id = %accepted.result_id,
            language = %extracted.language_label,
            "Accepted submission detected"
        );

        let event = SubmissionEvent {
            source_url: self.source.problem_url(&accepted.slug),
            slug: accepted.slug,
            raw_language_label: extracted.language_label,
            raw_code: extracted.code,
            difficulty: extracted.difficulty,
            detected_at: Utc::now(),
        };
        self.pipeline.run(event).await
    }

    pub async fn manual_sync(&self) -> Result<SyncOutcome, SyncError> {
        self.pipeline.sync_staged().await
    }

    pub async fn verify(&self) -> Result<(), VerifyError> {
        self.pipeline.verify().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryContentStore;
    use crate::sync::{
        ExtractedSource, RepoTarget, ResultReporter, SharedConfigStore, SnapshotExtractor,
    };

    fn service(store: Arc<MemoryContentStore>) -> (SyncService, Arc<SnapshotExtractor>) {
        let config = Arc::new(SharedConfigStore::new(RepoTarget {
            owner: Some("octo".to_string()),
            repo_name: Some("solutions".to_string()),
            access_token: Some("ghp_test".to_string()),
            ..RepoTarget::default()
        }));
        let pipeline = Arc::new(SyncPipeline::new(store, config, ResultReporter::new()));
        let extractor = Arc::new(SnapshotExtractor::new());
        (
            SyncService::new(pipeline, extractor.clone(), SourceConfig::default()),
            extractor,
        )
    }

    fn accepted(slug: &str) -> AcceptedEvent {
        AcceptedEvent {
            slug: slug.to_string(),
            result_id: "r-1".to_string(),
        }
    }

    #[tokio::test]
    async fn empty_extraction_is_skipped_without_record() {
        let store = Arc::new(MemoryContentStore::new());
        let (service, extractor) = service(store.clone());
        let page = SessionId::from("tab");

        let outcome = service.on_accepted(&page, accepted("two-sum")).await;
        assert!(matches!(outcome, SyncOutcome::Skipped { .. }));

        extractor
            .put(
                page.clone(),
                ExtractedSource {
                    code: "   ".to_string(),
                    language_label: "Python3".to_string(),
                    difficulty: None,
                },
            )
            .await;
        let outcome = service.on_accepted(&page, accepted("two-sum")).await;
        assert!(matches!(outcome, SyncOutcome::Skipped { .. }));

        assert_eq!(store.read_count(), 0);
        assert!(service.pipeline().reporter().latest().await.is_none());
    }

    #[tokio::test]
    async fn accepted_snapshot_is_synced_with_problem_url() {
        let store = Arc::new(MemoryContentStore::new());
        let (service, extractor) = service(store.clone());
        let page = SessionId::from("tab");
        extractor
            .put(
                page.clone(),
                ExtractedSource {
                    code: "class Solution {}".to_string(),
                    language_label: "C#".to_string(),
                    difficulty: Some("Medium".to_string()),
                },
            )
            .await;

        let outcome = service.on_accepted(&page, accepted("add-two-numbers")).await;

        assert_eq!(outcome.path(), Some("csharp/add_two_numbers.cs"));
        let text = store
            .text("octo/solutions", "csharp/add_two_numbers.cs")
            .expect("file");
        assert!(text.contains("// Source: https://leetcode.com/problems/add-two-numbers/\n"));
    }
}
