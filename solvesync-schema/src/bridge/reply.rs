use serde::{Deserialize, Serialize};

/// Uniform reply of every action endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActionReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionReply {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetUpdate {
    pub owner: String,
    pub repo_name: String,
    pub access_token: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AutoSyncUpdate {
    pub enabled: bool,
}
