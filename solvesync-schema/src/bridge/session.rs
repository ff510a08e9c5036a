use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenSessionRequest {
    /// Caller-chosen id; a random one is assigned when absent.
    #[serde(default)]
    pub session_id: Option<String>,

    /// Problem the page currently shows, if already known.
    #[serde(default)]
    pub slug: Option<String>,

    /// Whether the host could attach its result observer. `false` leaves the watcher inert.
    #[serde(default = "default_observer")]
    pub observer: bool,
}

fn default_observer() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenSessionResponse {
    pub session_id: String,
}

/// Editor contents captured by the host.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SnapshotBody {
    #[serde(default)]
    pub code: String,

    /// Language label exactly as the page shows it (e.g. `Python3`, `MySQL`).
    #[serde(default)]
    pub language: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}
