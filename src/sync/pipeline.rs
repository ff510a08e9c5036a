use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use solvesync_core::{HeaderInput, classify, compose, encode_content, resolve_path};

use super::{
    ConfigStore, PathLocks, ResultReporter, StagedSubmission, SubmissionEvent, SyncRecord,
};
use crate::error::{SyncError, VerifyError};
use crate::store::{ContentDescriptor, ContentStore, RepoCoordinates, WriteRequest};

/// How a run ended, as seen by the caller. Failures are already recorded by the time this is
/// returned.
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    Synced {
        path: String,
        created: bool,
        descriptor: ContentDescriptor,
    },
    /// Auto-sync is off; the submission waits for a manual trigger.
    Staged { path: String },
    /// An intentional halt. Nothing was recorded.
    Skipped { reason: String },
    Failed { message: String },
}

impl SyncOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, SyncOutcome::Failed { .. })
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            SyncOutcome::Synced { path, .. } | SyncOutcome::Staged { path } => Some(path),
            SyncOutcome::Skipped { .. } | SyncOutcome::Failed { .. } => None,
        }
    }
}

struct RunFailure {
    path: Option<String>,
    error: SyncError,
}

impl RunFailure {
    fn unresolved(error: SyncError) -> Self {
        Self { path: None, error }
    }

    fn at(path: &str, error: SyncError) -> Self {
        Self {
            path: Some(path.to_string()),
            error,
        }
    }
}

/// Classify, resolve, compose, then read-before-write against the content store.
pub struct SyncPipeline {
    store: Arc<dyn ContentStore>,
    config: Arc<dyn ConfigStore>,
    reporter: ResultReporter,
    locks: PathLocks,
    staged: Mutex<Option<StagedSubmission>>,
}

impl SyncPipeline {
    pub fn new(
        store: Arc<dyn ContentStore>,
        config: Arc<dyn ConfigStore>,
        reporter: ResultReporter,
    ) -> Self {
        Self {
            store,
            config,
            reporter,
            locks: PathLocks::new(),
            staged: Mutex::new(None),
        }
    }

    pub fn reporter(&self) -> &ResultReporter {
        &self.reporter
    }

    pub async fn staged_path(&self) -> Option<String> {
        self.staged.lock().await.as_ref().map(|s| s.path.clone())
    }

    /// Runs one accepted submission end to end. Never returns an error: every failure is
    /// converted into a record here.
    pub async fn run(&self, event: SubmissionEvent) -> SyncOutcome {
        let slug = event.slug.clone();
        match self.stage_and_push(event).await {
            Ok(outcome) => outcome,
            Err(failure) => self.conclude(&slug, failure).await,
        }
    }

    /// Pushes the staged submission with a fresh config snapshot.
    ///
    /// `NothingStaged` is returned to the caller and leaves the reporter untouched.
    pub async fn sync_staged(&self) -> Result<SyncOutcome, SyncError> {
        let Some(staged) = self.staged.lock().await.clone() else {
            return Err(SyncError::NothingStaged);
        };

        let target = self.config.read().await;
        let pushed = match target.coordinates() {
            Ok(repo) => self.push(&repo, &staged).await,
            Err(e) => Err(RunFailure::unresolved(e)),
        };

        Ok(match pushed {
            Ok(outcome) => outcome,
            Err(failure) => self.conclude(&staged.event.slug, failure).await,
        })
    }

    /// Checks the configured destination and credential without writing anything.
    pub async fn verify(&self) -> Result<(), VerifyError> {
        let repo = self
            .config
            .read()
            .await
            .coordinates()
            .map_err(VerifyError::Config)?;
        self.store.verify(&repo).await.map_err(VerifyError::from)?;
        info!(repo = %repo.full_name(), "Destination verified");
        Ok(())
    }

    async fn stage_and_push(&self, event: SubmissionEvent) -> Result<SyncOutcome, RunFailure> {
        let target = self.config.read().await;
        let repo = target.coordinates().map_err(RunFailure::unresolved)?;

        let classification = classify(&event.raw_language_label);
        if classification.is_unknown() {
            return Err(RunFailure::unresolved(SyncError::ClassificationUnknown {
                label: event.raw_language_label.clone(),
            }));
        }
        let path = resolve_path(&classification, &event.slug)
            .map_err(|e| RunFailure::unresolved(e.into()))?;

        let content = compose(
            &HeaderInput {
                slug: &event.slug,
                classification: &classification,
                raw_language_label: &event.raw_language_label,
                source_location: &event.source_url,
                now: event.detected_at,
            },
            &event.raw_code,
        );

        let staged = StagedSubmission {
            event,
            classification,
            path,
            content,
        };
        *self.staged.lock().await = Some(staged.clone());

        if !target.auto_sync_enabled {
            info!(
                slug = %staged.event.slug,
                path = %staged.path,
                "Auto-sync disabled; submission staged"
            );
            return Ok(SyncOutcome::Staged { path: staged.path });
        }

        self.push(&repo, &staged).await
    }

    async fn push(
        &self,
        repo: &RepoCoordinates,
        staged: &StagedSubmission,
    ) -> Result<SyncOutcome, RunFailure> {
        let path = staged.path.as_str();
        let lock_key = format!("{}/{path}", repo.full_name());

        let (descriptor, created) = {
            let _guard = self.locks.acquire(&lock_key).await;

            let version = self
                .store
                .read_version(repo, path)
                .await
                .map_err(|e| RunFailure::at(path, SyncError::from_read(e)))?;
            let created = version.is_none();
            debug!(repo = %repo.full_name(), path, created, "Resolved current version");

            let request = WriteRequest {
                message: staged.commit_message(!created),
                encoded_content: encode_content(&staged.content),
                version,
            };
            let descriptor = self
                .store
                .write(repo, path, &request)
                .await
                .map_err(|e| RunFailure::at(path, SyncError::from_write(e)))?;
            (descriptor, created)
        };

        info!(
            repo = %repo.full_name(),
            path,
            created,
            sha = %descriptor.version,
            "Submission synced"
        );
        self.reporter.record(SyncRecord::success(path)).await;

        Ok(SyncOutcome::Synced {
            path: path.to_string(),
            created,
            descriptor,
        })
    }

    async fn conclude(&self, slug: &str, failure: RunFailure) -> SyncOutcome {
        let RunFailure { path, error } = failure;
        let message = error.to_string();

        if error.is_silent() {
            debug!(slug, reason = %message, "Sync skipped");
            return SyncOutcome::Skipped { reason: message };
        }

        warn!(slug, path = ?path, error = %message, "Sync failed");
        self.reporter
            .record(SyncRecord::error(path, message.clone()))
            .await;
        SyncOutcome::Failed { message }
    }
}
