//! Remote content store seam.
//!
//! The pipeline only needs three operations from the remote side: read the version token of a
//! path, create-or-update a path, and check that a destination is reachable with the given
//! credential. [`crate::github::GithubContents`] talks to the GitHub Contents API;
//! [`MemoryContentStore`] keeps files in process with the same token contract.

mod memory;

pub use memory::MemoryContentStore;

use async_trait::async_trait;
use std::fmt;

use crate::error::StoreError;

/// Opaque token identifying one version of a remote file (the blob sha on GitHub).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionToken(String);

impl VersionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully resolved destination, produced from a config snapshot that passed the precondition.
#[derive(Clone, PartialEq, Eq)]
pub struct RepoCoordinates {
    pub owner: String,
    pub repo: String,
    pub access_token: String,
    pub branch: Option<String>,
}

impl RepoCoordinates {
    /// `owner/repo`, used for log fields and lock keys.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Debug for RepoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepoCoordinates")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("access_token", &"<redacted>")
            .field("branch", &self.branch)
            .finish()
    }
}

/// One create-or-update.
#[derive(Debug, Clone)]
pub struct WriteRequest {
    pub message: String,
    /// Transport-encoded (base64) file content.
    pub encoded_content: String,
    /// `Some` when updating an existing file, `None` when creating.
    pub version: Option<VersionToken>,
}

/// The file as the remote store sees it after a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDescriptor {
    pub path: String,
    pub version: VersionToken,
    pub html_url: Option<String>,
    pub commit_sha: Option<String>,
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Current version token of `path`; `Ok(None)` when the file does not exist.
    async fn read_version(
        &self,
        repo: &RepoCoordinates,
        path: &str,
    ) -> Result<Option<VersionToken>, StoreError>;

    /// Creates `path` (no version) or updates it (current version). A missing or stale version
    /// against an existing file is rejected by the store.
    async fn write(
        &self,
        repo: &RepoCoordinates,
        path: &str,
        request: &WriteRequest,
    ) -> Result<ContentDescriptor, StoreError>;

    /// Checks that the destination exists and the credential can reach it.
    async fn verify(&self, repo: &RepoCoordinates) -> Result<(), StoreError>;
}
