use crate::error::BridgeError;
use crate::server::router::BridgeState;
use axum::{Json, extract::State};
use solvesync_schema::{ActionReply, AutoSyncUpdate, TargetUpdate};
use tracing::info;

/// PUT /config/target
pub async fn update_target(
    State(state): State<BridgeState>,
    Json(update): Json<TargetUpdate>,
) -> Result<Json<ActionReply>, BridgeError> {
    let owner = update.owner.trim().to_string();
    let repo_name = update.repo_name.trim().to_string();
    let access_token = update.access_token.trim().to_string();

    let missing: Vec<&str> = [
        ("owner", &owner),
        ("repo_name", &repo_name),
        ("access_token", &access_token),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| name)
    .collect();
    if !missing.is_empty() {
        return Err(BridgeError::InvalidRequest(format!(
            "Required fields are blank: {}",
            missing.join(", ")
        )));
    }

    info!(%owner, %repo_name, "Destination updated");
    state
        .config
        .update_target(owner, repo_name, access_token)
        .await;
    Ok(Json(ActionReply::ok()))
}

/// PUT /config/auto-sync
pub async fn set_auto_sync(
    State(state): State<BridgeState>,
    Json(update): Json<AutoSyncUpdate>,
) -> Json<ActionReply> {
    state.config.set_auto_sync(update.enabled).await;
    info!(enabled = update.enabled, "Auto-sync toggled");
    Json(ActionReply::ok())
}
