use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error as ThisError;

/// Errors surfaced by the bridge HTTP layer itself (not pipeline outcomes).
#[derive(Debug, ThisError)]
pub enum BridgeError {
    #[error("Unknown session: {0}")]
    UnknownSession(String),

    #[error("Session already open: {0}")]
    SessionExists(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Ractor error: {0}")]
    RactorError(String),
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            BridgeError::UnknownSession(id) => (
                StatusCode::NOT_FOUND,
                ApiErrorObject {
                    code: "UNKNOWN_SESSION".to_string(),
                    message: format!("No watcher session `{id}`."),
                },
            ),
            BridgeError::SessionExists(id) => (
                StatusCode::CONFLICT,
                ApiErrorObject {
                    code: "SESSION_EXISTS".to_string(),
                    message: format!("Watcher session `{id}` is already open."),
                },
            ),
            BridgeError::InvalidRequest(message) => (
                StatusCode::BAD_REQUEST,
                ApiErrorObject {
                    code: "INVALID_REQUEST".to_string(),
                    message,
                },
            ),
            BridgeError::RactorError(e) => {
                tracing::error!(error = %e, "Bridge internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorObject {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorBody { inner: error_body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}
