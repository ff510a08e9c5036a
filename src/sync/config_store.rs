use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::SyncError;
use crate::store::RepoCoordinates;

/// Destination settings as the rest of the system manages them.
#[derive(Clone, PartialEq, Eq)]
pub struct RepoTarget {
    pub owner: Option<String>,
    pub repo_name: Option<String>,
    pub access_token: Option<String>,
    pub auto_sync_enabled: bool,
    pub branch: Option<String>,
}

impl Default for RepoTarget {
    fn default() -> Self {
        Self {
            owner: None,
            repo_name: None,
            access_token: None,
            auto_sync_enabled: true,
            branch: None,
        }
    }
}

impl RepoTarget {
    /// The precondition every run starts with. Blank values count as missing.
    pub fn coordinates(&self) -> Result<RepoCoordinates, SyncError> {
        fn present(value: Option<&String>) -> Option<String> {
            value.map(|v| v.trim()).filter(|v| !v.is_empty()).map(str::to_string)
        }

        let owner = present(self.owner.as_ref());
        let repo = present(self.repo_name.as_ref());
        let access_token = present(self.access_token.as_ref());

        match (owner, repo, access_token) {
            (Some(owner), Some(repo), Some(access_token)) => Ok(RepoCoordinates {
                owner,
                repo,
                access_token,
                branch: present(self.branch.as_ref()),
            }),
            (owner, repo, access_token) => {
                let fields = [
                    ("owner", owner.is_none()),
                    ("repo_name", repo.is_none()),
                    ("access_token", access_token.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, missing)| missing.then_some(name))
                .collect();
                Err(SyncError::ConfigMissing { fields })
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.coordinates().is_ok()
    }
}

impl std::fmt::Debug for RepoTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoTarget")
            .field("owner", &self.owner)
            .field("repo_name", &self.repo_name)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("auto_sync_enabled", &self.auto_sync_enabled)
            .field("branch", &self.branch)
            .finish()
    }
}

/// Read side the pipeline depends on. Every call returns an independent snapshot.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn read(&self) -> RepoTarget;
}

/// In-memory store seeded from the config file and updated through the bridge.
pub struct SharedConfigStore {
    inner: RwLock<RepoTarget>,
}

impl SharedConfigStore {
    pub fn new(target: RepoTarget) -> Self {
        Self {
            inner: RwLock::new(target),
        }
    }

    pub async fn update_target(&self, owner: String, repo_name: String, access_token: String) {
        let mut target = self.inner.write().await;
        target.owner = Some(owner);
        target.repo_name = Some(repo_name);
        target.access_token = Some(access_token);
    }

    pub async fn set_auto_sync(&self, enabled: bool) {
        self.inner.write().await.auto_sync_enabled = enabled;
    }
}

#[async_trait]
impl ConfigStore for SharedConfigStore {
    async fn read(&self) -> RepoTarget {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_blank_fields_are_reported() {
        let target = RepoTarget {
            owner: Some("octo".to_string()),
            repo_name: Some("   ".to_string()),
            ..RepoTarget::default()
        };

        match target.coordinates() {
            Err(SyncError::ConfigMissing { fields }) => {
                assert_eq!(fields, vec!["repo_name", "access_token"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn complete_target_resolves_trimmed_coordinates() {
        let target = RepoTarget {
            owner: Some(" octo ".to_string()),
            repo_name: Some("solutions".to_string()),
            access_token: Some("tok".to_string()),
            auto_sync_enabled: true,
            branch: Some(String::new()),
        };

        let coords = target.coordinates().expect("configured");
        assert_eq!(coords.owner, "octo");
        assert_eq!(coords.full_name(), "octo/solutions");
        assert_eq!(coords.branch, None);
        assert!(!format!("{coords:?}").contains("tok"));
    }

    #[tokio::test]
    async fn snapshots_are_independent_of_later_updates() {
        let store = SharedConfigStore::new(RepoTarget::default());
        let before = store.read().await;

        store
            .update_target("octo".into(), "solutions".into(), "tok".into())
            .await;
        store.set_auto_sync(false).await;

        assert!(!before.is_configured());
        assert!(before.auto_sync_enabled);
        let after = store.read().await;
        assert!(after.is_configured());
        assert!(!after.auto_sync_enabled);
    }
}
