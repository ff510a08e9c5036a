use crate::error::BridgeError;
use crate::server::router::BridgeState;
use crate::sync::ExtractedSource;
use crate::watcher::SessionId;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use solvesync_schema::{HostSignal, OpenSessionRequest, OpenSessionResponse, SnapshotBody};

/// POST /sessions
pub async fn open_session(
    State(state): State<BridgeState>,
    Json(req): Json<OpenSessionRequest>,
) -> Result<Json<OpenSessionResponse>, BridgeError> {
    let page = req
        .session_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .map_or_else(SessionId::random, SessionId::from);

    state
        .sessions
        .open(page.clone(), req.slug, req.observer)
        .await?;

    Ok(Json(OpenSessionResponse {
        session_id: page.to_string(),
    }))
}

/// POST /sessions/{id}/signals
///
/// Accepted for processing; the watcher applies signals in arrival order.
pub async fn post_signal(
    State(state): State<BridgeState>,
    Path(id): Path<String>,
    payload: Result<Json<HostSignal>, JsonRejection>,
) -> Result<StatusCode, BridgeError> {
    let Json(signal) = payload.map_err(|e| BridgeError::InvalidRequest(e.body_text()))?;
    state.sessions.signal(&SessionId::from(id), signal).await?;
    Ok(StatusCode::ACCEPTED)
}

/// PUT /sessions/{id}/snapshot
pub async fn put_snapshot(
    State(state): State<BridgeState>,
    Path(id): Path<String>,
    Json(body): Json<SnapshotBody>,
) -> Result<StatusCode, BridgeError> {
    let page = SessionId::from(id);
    if !state.sessions.contains(&page).await {
        return Err(BridgeError::UnknownSession(page.to_string()));
    }

    state
        .snapshots
        .put(
            page,
            ExtractedSource {
                code: body.code,
                language_label: body.language,
                difficulty: body.difficulty,
            },
        )
        .await;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /sessions/{id}
pub async fn close_session(
    State(state): State<BridgeState>,
    Path(id): Path<String>,
) -> Result<StatusCode, BridgeError> {
    let page = SessionId::from(id);
    state.sessions.close(&page).await?;
    state.snapshots.forget(&page).await;
    Ok(StatusCode::NO_CONTENT)
}
