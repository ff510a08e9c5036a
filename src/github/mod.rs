//! GitHub Contents API implementation of [`crate::store::ContentStore`].

mod api;

pub use api::ContentsApi;

use async_trait::async_trait;
use reqwest::StatusCode;
use solvesync_schema::{ContentsFile, PutContentsRequest, PutContentsResponse, RepositoryInfo};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::GithubConfig;
use crate::error::StoreError;
use crate::store::{ContentDescriptor, ContentStore, RepoCoordinates, VersionToken, WriteRequest};
use crate::utils::logging::debug_upstream_body;

/// Fixed User-Agent; GitHub rejects requests without one.
pub(crate) const SOLVESYNC_USER_AGENT: &str = concat!("solvesync/", env!("CARGO_PKG_VERSION"));

pub(crate) const GITHUB_API_VERSION: &str = "2022-11-28";

#[derive(Clone)]
pub struct GithubContents {
    client: reqwest::Client,
    api_base: Url,
}

impl GithubContents {
    pub fn new(client: reqwest::Client, api_base: Url) -> Self {
        Self { client, api_base }
    }

    /// Builds the upstream client from config.
    pub fn from_config(cfg: &GithubConfig) -> Result<Self, StoreError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(SOLVESYNC_USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(cfg.timeout_secs.max(1)));

        if let Some(proxy_url) = cfg.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }

        info!(
            api_base = %cfg.api_base,
            proxy = %cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
            timeout_secs = cfg.timeout_secs,
            "GitHub client config (effective)"
        );

        Ok(Self::new(builder.build()?, cfg.api_base.clone()))
    }

    async fn failure(operation: &'static str, resp: reqwest::Response) -> StoreError {
        let status = resp.status();
        let bytes = resp.bytes().await.unwrap_or_default();
        let body = String::from_utf8_lossy(&bytes).into_owned();
        debug_upstream_body(operation, status, &body);
        StoreError::Status { status, body }
    }
}

#[async_trait]
impl ContentStore for GithubContents {
    async fn read_version(
        &self,
        repo: &RepoCoordinates,
        path: &str,
    ) -> Result<Option<VersionToken>, StoreError> {
        let req = ContentsApi::build_read_request(&self.client, &self.api_base, repo, path)?;
        let resp = self.client.execute(req).await?;

        match resp.status() {
            StatusCode::NOT_FOUND => {
                debug!(repo = %repo.full_name(), path, "[GitHub] File absent, will create");
                Ok(None)
            }
            status if status.is_success() => {
                let file: ContentsFile = serde_json::from_slice(&resp.bytes().await?)?;
                debug!(
                    repo = %repo.full_name(),
                    path,
                    sha = %file.sha,
                    "[GitHub] File present, will update"
                );
                Ok(Some(VersionToken::new(file.sha)))
            }
            _ => Err(Self::failure("read", resp).await),
        }
    }

    async fn write(
        &self,
        repo: &RepoCoordinates,
        path: &str,
        request: &WriteRequest,
    ) -> Result<ContentDescriptor, StoreError> {
        let body = PutContentsRequest {
            message: request.message.clone(),
            content: request.encoded_content.clone(),
            sha: request.version.as_ref().map(|v| v.as_str().to_string()),
            branch: repo.branch.clone(),
        };
        let req =
            ContentsApi::build_write_request(&self.client, &self.api_base, repo, path, &body)?;
        let resp = self.client.execute(req).await?;

        if !resp.status().is_success() {
            return Err(Self::failure("write", resp).await);
        }

        let status = resp.status();
        let written: PutContentsResponse = serde_json::from_slice(&resp.bytes().await?)?;
        info!(
            repo = %repo.full_name(),
            path = %written.content.path,
            %status,
            sha = %written.content.sha,
            commit = %written.commit.sha,
            "[GitHub] Contents written"
        );

        Ok(ContentDescriptor {
            path: written.content.path,
            version: VersionToken::new(written.content.sha),
            html_url: written.content.html_url,
            commit_sha: Some(written.commit.sha),
        })
    }

    async fn verify(&self, repo: &RepoCoordinates) -> Result<(), StoreError> {
        let req = ContentsApi::build_repository_request(&self.client, &self.api_base, repo)?;
        let resp = self.client.execute(req).await?;

        if !resp.status().is_success() {
            return Err(Self::failure("verify", resp).await);
        }

        let info: RepositoryInfo = serde_json::from_slice(&resp.bytes().await?)?;
        match info.permissions {
            Some(perms) if !perms.push => warn!(
                repo = %info.full_name,
                "[GitHub] Repository reachable but token lacks push permission"
            ),
            _ => info!(repo = %info.full_name, "[GitHub] Repository verified"),
        }
        Ok(())
    }
}
