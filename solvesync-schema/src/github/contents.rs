use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// File descriptor returned by `GET /repos/{owner}/{repo}/contents/{path}`.
///
/// Only the fields the sync pipeline reads are typed; everything else is kept in `extra`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentsFile {
    pub path: String,

    /// Blob sha. Doubles as the version token for optimistic updates.
    pub sha: String,

    #[serde(default)]
    pub size: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,

    /// Base64 payload, wrapped at 60 columns by the upstream. Absent for directories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,

    #[serde(flatten)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PutContentsRequest {
    pub message: String,

    /// Base64 of the UTF-8 file bytes.
    pub content: String,

    /// Required when the file exists; must be omitted on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommitSummary {
    pub sha: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,

    #[serde(flatten)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

/// Response of a successful create (201) or update (200).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PutContentsResponse {
    pub content: ContentsFile,
    pub commit: CommitSummary,
}
