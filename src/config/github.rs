use serde::{Deserialize, Serialize};
use url::Url;

use crate::sync::RepoTarget;

/// Destination repository and GitHub client configuration managed by Figment.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GithubConfig {
    /// TOML: `github.owner`.
    #[serde(default)]
    pub owner: Option<String>,

    /// TOML: `github.repo_name`.
    #[serde(default)]
    pub repo_name: Option<String>,

    /// Fine-grained token with contents read/write on the repository.
    /// TOML: `github.access_token`. Prefer `SOLVESYNC_GITHUB__ACCESS_TOKEN`.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Push every accepted submission immediately; when off, submissions are staged for
    /// `POST /sync`. TOML: `github.auto_sync`. Default: `true`.
    #[serde(default = "default_auto_sync")]
    pub auto_sync: bool,

    /// Target branch; the repository default branch when unset.
    /// TOML: `github.branch`.
    #[serde(default)]
    pub branch: Option<String>,

    /// REST API root. TOML: `github.api_base`. Default: `https://api.github.com/`.
    #[serde(default = "default_api_base")]
    pub api_base: Url,

    /// Optional upstream HTTP proxy. TOML: `github.proxy`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Whole-request timeout for upstream calls.
    /// TOML: `github.timeout_secs`. Default: `30`.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl GithubConfig {
    /// Seed value for the in-memory config store.
    pub fn target(&self) -> RepoTarget {
        RepoTarget {
            owner: self.owner.clone(),
            repo_name: self.repo_name.clone(),
            access_token: self.access_token.clone(),
            auto_sync_enabled: self.auto_sync,
            branch: self.branch.clone(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            owner: None,
            repo_name: None,
            access_token: None,
            auto_sync: default_auto_sync(),
            branch: None,
            api_base: default_api_base(),
            proxy: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubConfig")
            .field("owner", &self.owner)
            .field("repo_name", &self.repo_name)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("auto_sync", &self.auto_sync)
            .field("branch", &self.branch)
            .field("api_base", &self.api_base.as_str())
            .field("proxy", &self.proxy.as_ref().map(Url::as_str))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_auto_sync() -> bool {
    true
}

fn default_api_base() -> Url {
    Url::parse("https://api.github.com/").expect("invalid fixed GitHub API URL")
}

fn default_timeout_secs() -> u64 {
    30
}
