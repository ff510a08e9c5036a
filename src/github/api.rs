use reqwest::header::{ACCEPT, AUTHORIZATION};
use solvesync_schema::PutContentsRequest;
use url::Url;

use super::GITHUB_API_VERSION;
use crate::error::StoreError;
use crate::store::RepoCoordinates;

const GITHUB_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

pub struct ContentsApi;

impl ContentsApi {
    /// `{api_base}/repos/{owner}/{repo}[/contents/{path...}]`, every segment percent-encoded.
    pub fn endpoint(
        api_base: &Url,
        repo: &RepoCoordinates,
        path: Option<&str>,
    ) -> Result<Url, StoreError> {
        let mut url = api_base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                StoreError::Payload(format!("API base `{api_base}` cannot carry a path"))
            })?;
            segments
                .pop_if_empty()
                .extend(["repos", repo.owner.as_str(), repo.repo.as_str()]);
            if let Some(path) = path {
                segments
                    .push("contents")
                    .extend(path.split('/').filter(|s| !s.is_empty()));
            }
        }
        Ok(url)
    }

    fn authorized(
        builder: reqwest::RequestBuilder,
        repo: &RepoCoordinates,
    ) -> reqwest::RequestBuilder {
        builder
            .header(AUTHORIZATION, format!("Bearer {}", repo.access_token))
            .header(ACCEPT, GITHUB_JSON)
            .header(API_VERSION_HEADER, GITHUB_API_VERSION)
    }

    pub fn build_read_request(
        client: &reqwest::Client,
        api_base: &Url,
        repo: &RepoCoordinates,
        path: &str,
    ) -> Result<reqwest::Request, StoreError> {
        let mut url = Self::endpoint(api_base, repo, Some(path))?;
        if let Some(branch) = repo.branch.as_deref() {
            url.query_pairs_mut().append_pair("ref", branch);
        }
        Ok(Self::authorized(client.get(url), repo).build()?)
    }

    pub fn build_write_request(
        client: &reqwest::Client,
        api_base: &Url,
        repo: &RepoCoordinates,
        path: &str,
        body: &PutContentsRequest,
    ) -> Result<reqwest::Request, StoreError> {
        let url = Self::endpoint(api_base, repo, Some(path))?;
        Ok(Self::authorized(client.put(url), repo).json(body).build()?)
    }

    pub fn build_repository_request(
        client: &reqwest::Client,
        api_base: &Url,
        repo: &RepoCoordinates,
    ) -> Result<reqwest::Request, StoreError> {
        let url = Self::endpoint(api_base, repo, None)?;
        Ok(Self::authorized(client.get(url), repo).build()?)
    }
}
