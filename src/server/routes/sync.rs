use crate::server::router::BridgeState;
use crate::sync::{ConfigStore, SyncOutcome, SyncRecord};
use axum::{Json, extract::State};
use serde::Serialize;
use solvesync_schema::ActionReply;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub latest: Option<SyncRecord>,
    pub staged_path: Option<String>,
    pub auto_sync: bool,
    pub configured: bool,
    pub open_sessions: usize,
}

/// POST /sync
///
/// Pushes the staged submission regardless of the auto-sync flag.
pub async fn manual_sync(State(state): State<BridgeState>) -> Json<ActionReply> {
    let reply = match state.service.manual_sync().await {
        Ok(SyncOutcome::Synced { .. } | SyncOutcome::Staged { .. }) => ActionReply::ok(),
        Ok(SyncOutcome::Failed { message }) => ActionReply::failed(message),
        Ok(SyncOutcome::Skipped { reason }) => ActionReply::failed(reason),
        Err(e) => ActionReply::failed(e.to_string()),
    };
    Json(reply)
}

/// GET /status
pub async fn status(State(state): State<BridgeState>) -> Json<StatusResponse> {
    let pipeline = state.service.pipeline();
    let target = state.config.read().await;

    Json(StatusResponse {
        latest: pipeline.reporter().latest().await,
        staged_path: pipeline.staged_path().await,
        auto_sync: target.auto_sync_enabled,
        configured: target.is_configured(),
        open_sessions: state.sessions.len().await,
    })
}

/// POST /verify
pub async fn verify(State(state): State<BridgeState>) -> Json<ActionReply> {
    match state.service.verify().await {
        Ok(()) => Json(ActionReply::ok()),
        Err(e) => Json(ActionReply::failed(e.to_string())),
    }
}
