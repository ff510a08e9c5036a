use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// GitHub REST error envelope (`{"message": ..., "documentation_url": ...}`).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GithubErrorBody {
    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,

    #[serde(flatten)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl GithubErrorBody {
    /// Best-effort parse; falls back to treating the whole body as the message.
    pub fn from_raw(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| Self {
            message: raw.trim().to_string(),
            ..Self::default()
        })
    }
}
