use ahash::AHashMap;
use async_trait::async_trait;
use reqwest::StatusCode;
use solvesync_core::decode_content;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use super::{ContentDescriptor, ContentStore, RepoCoordinates, VersionToken, WriteRequest};
use crate::error::StoreError;

#[derive(Debug, Clone)]
struct StoredFile {
    text: String,
    version: VersionToken,
}

/// In-process content store with GitHub's version-token rules.
///
/// Writes to an existing file must carry its current token; every accepted write mints a new
/// token. Failures can be injected per operation to exercise the pipeline's error paths.
#[derive(Default)]
pub struct MemoryContentStore {
    files: Mutex<AHashMap<(String, String), StoredFile>>,
    generation: AtomicU64,
    required_token: Option<String>,
    latency: Option<Duration>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    read_failure: Mutex<Option<(StatusCode, String)>>,
    write_failure: Mutex<Option<(StatusCode, String)>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects every call whose access token differs from `token` with 401.
    #[must_use]
    pub fn with_required_token(mut self, token: impl Into<String>) -> Self {
        self.required_token = Some(token.into());
        self
    }

    /// Suspends every read and write for `latency`, so concurrent runs can interleave.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Places a file directly, bypassing token checks. Returns its version.
    pub fn seed(&self, repo: &str, path: &str, text: &str) -> VersionToken {
        let version = self.next_version();
        self.lock_files().insert(
            (repo.to_string(), path.to_string()),
            StoredFile {
                text: text.to_string(),
                version: version.clone(),
            },
        );
        version
    }

    pub fn text(&self, repo: &str, path: &str) -> Option<String> {
        self.lock_files()
            .get(&(repo.to_string(), path.to_string()))
            .map(|f| f.text.clone())
    }

    pub fn version(&self, repo: &str, path: &str) -> Option<VersionToken> {
        self.lock_files()
            .get(&(repo.to_string(), path.to_string()))
            .map(|f| f.version.clone())
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// The next read answers `status` with `body`.
    pub fn fail_next_read(&self, status: StatusCode, body: impl Into<String>) {
        *self
            .read_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some((status, body.into()));
    }

    /// The next write answers `status` with `body`.
    pub fn fail_next_write(&self, status: StatusCode, body: impl Into<String>) {
        *self
            .write_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some((status, body.into()));
    }

    fn lock_files(&self) -> std::sync::MutexGuard<'_, AHashMap<(String, String), StoredFile>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_version(&self) -> VersionToken {
        let n = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        VersionToken::new(format!("{n:040x}"))
    }

    fn check_token(&self, repo: &RepoCoordinates) -> Result<(), StoreError> {
        match &self.required_token {
            Some(expected) if *expected != repo.access_token => Err(StoreError::Status {
                status: StatusCode::UNAUTHORIZED,
                body: r#"{"message":"Bad credentials"}"#.to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn take_failure(slot: &Mutex<Option<(StatusCode, String)>>) -> Result<(), StoreError> {
        match slot.lock().unwrap_or_else(PoisonError::into_inner).take() {
            Some((status, body)) => Err(StoreError::Status { status, body }),
            None => Ok(()),
        }
    }

    async fn pause(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

fn rejected(status: StatusCode, message: &str) -> StoreError {
    StoreError::Status {
        status,
        body: serde_json::json!({ "message": message }).to_string(),
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn read_version(
        &self,
        repo: &RepoCoordinates,
        path: &str,
    ) -> Result<Option<VersionToken>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.check_token(repo)?;
        Self::take_failure(&self.read_failure)?;

        Ok(self.version(&repo.full_name(), path))
    }

    async fn write(
        &self,
        repo: &RepoCoordinates,
        path: &str,
        request: &WriteRequest,
    ) -> Result<ContentDescriptor, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.check_token(repo)?;
        Self::take_failure(&self.write_failure)?;

        let text = decode_content(&request.encoded_content).map_err(|e| {
            rejected(
                StatusCode::UNPROCESSABLE_ENTITY,
                &format!("content is not valid Base64: {e}"),
            )
        })?;

        let key = (repo.full_name(), path.to_string());
        let mut files = self.lock_files();
        let current = files.get(&key).map(|f| f.version.clone());

        match (&current, &request.version) {
            (Some(_), None) => {
                return Err(rejected(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Invalid request.\n\n\"sha\" wasn't supplied.",
                ));
            }
            (Some(current), Some(supplied)) if current != supplied => {
                return Err(rejected(
                    StatusCode::CONFLICT,
                    &format!("{path} does not match {supplied}"),
                ));
            }
            (None, Some(supplied)) => {
                return Err(rejected(
                    StatusCode::CONFLICT,
                    &format!("{path} does not exist at {supplied}"),
                ));
            }
            _ => {}
        }

        let version = self.next_version();
        files.insert(
            key,
            StoredFile {
                text,
                version: version.clone(),
            },
        );

        Ok(ContentDescriptor {
            path: path.to_string(),
            version,
            html_url: None,
            commit_sha: None,
        })
    }

    async fn verify(&self, repo: &RepoCoordinates) -> Result<(), StoreError> {
        self.check_token(repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvesync_core::encode_content;

    fn repo(token: &str) -> RepoCoordinates {
        RepoCoordinates {
            owner: "octo".to_string(),
            repo: "solutions".to_string(),
            access_token: token.to_string(),
            branch: None,
        }
    }

    fn request(text: &str, version: Option<VersionToken>) -> WriteRequest {
        WriteRequest {
            message: "msg".to_string(),
            encoded_content: encode_content(text),
            version,
        }
    }

    #[tokio::test]
    async fn create_then_update_with_current_token() {
        let store = MemoryContentStore::new();
        let repo = repo("t");

        assert_eq!(store.read_version(&repo, "a.py").await.expect("read"), None);
        let created = store
            .write(&repo, "a.py", &request("v1 ✓", None))
            .await
            .expect("create");

        let current = store.read_version(&repo, "a.py").await.expect("read");
        assert_eq!(current.as_ref(), Some(&created.version));

        let updated = store
            .write(&repo, "a.py", &request("v2 ✓", current))
            .await
            .expect("update");
        assert_ne!(updated.version, created.version);
        assert_eq!(store.text("octo/solutions", "a.py").as_deref(), Some("v2 ✓"));
    }

    #[tokio::test]
    async fn stale_or_missing_token_is_rejected() {
        let store = MemoryContentStore::new();
        let repo = repo("t");
        let stale = store.seed("octo/solutions", "a.py", "old");
        let _ = store
            .write(&repo, "a.py", &request("newer", Some(stale.clone())))
            .await
            .expect("update with current token");

        let err = store
            .write(&repo, "a.py", &request("lost update", Some(stale)))
            .await
            .expect_err("stale token must be rejected");
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));

        let err = store
            .write(&repo, "a.py", &request("blind overwrite", None))
            .await
            .expect_err("missing token must be rejected");
        assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert_eq!(store.text("octo/solutions", "a.py").as_deref(), Some("newer"));
    }

    #[tokio::test]
    async fn wrong_token_is_unauthorized_everywhere() {
        let store = MemoryContentStore::new().with_required_token("good");
        let bad = repo("bad");

        for err in [
            store.read_version(&bad, "a.py").await.expect_err("read"),
            store
                .write(&bad, "a.py", &request("x", None))
                .await
                .expect_err("write"),
            store.verify(&bad).await.expect_err("verify"),
        ] {
            assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        }
        assert!(store.verify(&repo("good")).await.is_ok());
    }

    #[tokio::test]
    async fn injected_failures_fire_once() {
        let store = MemoryContentStore::new();
        let repo = repo("t");
        store.fail_next_read(StatusCode::BAD_GATEWAY, "down");

        let err = store.read_version(&repo, "a.py").await.expect_err("read");
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
        assert!(store.read_version(&repo, "a.py").await.is_ok());
        assert_eq!(store.read_count(), 2);
    }
}
