use reqwest::StatusCode;
use serde::Serialize;
use solvesync_core::ResolveError;
use solvesync_schema::GithubErrorBody;
use thiserror::Error as ThisError;

use super::{StoreError, UPSTREAM_BODY_PREVIEW_CHARS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteFailureKind {
    /// The credential was rejected (401).
    Auth,
    /// The version token no longer matches the remote file (409).
    Conflict,
    /// Any other rejection.
    Rejected,
}

/// Everything that can stop a pipeline run.
#[derive(Debug, ThisError)]
pub enum SyncError {
    /// Destination coordinates or credential are not configured.
    #[error("GitHub is not configured: missing {}", .fields.join(", "))]
    ConfigMissing { fields: Vec<&'static str> },

    /// The language label matched no alias. Intentional, not reported.
    #[error("Language `{label}` is not synced")]
    ClassificationUnknown { label: String },

    #[error("Unsupported language: {language}")]
    UnsupportedLanguage { language: String },

    /// The extractor returned no code or no language. Intentional, not reported.
    #[error("No code or language could be read from the page")]
    ExtractionEmpty,

    /// The version-token read failed with something other than 404.
    #[error(
        "Failed to read the current file from GitHub ({}): {}",
        status_label(.status),
        preview(.body)
    )]
    Transport {
        status: Option<StatusCode>,
        body: String,
    },

    #[error("{}", write_failure_message(.kind, .status, .body))]
    WriteFailure {
        kind: WriteFailureKind,
        status: Option<StatusCode>,
        body: String,
    },

    #[error("No submission is staged for manual sync")]
    NothingStaged,
}

impl SyncError {
    /// Halts that are part of normal operation and must not surface as an error record.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            SyncError::ClassificationUnknown { .. } | SyncError::ExtractionEmpty
        )
    }

    /// Maps a failed version-token read.
    pub fn from_read(err: StoreError) -> Self {
        match err {
            StoreError::Status { status, body } => SyncError::Transport {
                status: Some(status),
                body,
            },
            StoreError::Reqwest(e) => SyncError::Transport {
                status: e.status(),
                body: e.to_string(),
            },
            StoreError::Payload(body) => SyncError::Transport { status: None, body },
        }
    }

    /// Maps a failed create-or-update.
    pub fn from_write(err: StoreError) -> Self {
        match err {
            StoreError::Status { status, body } => {
                let kind = match status {
                    StatusCode::UNAUTHORIZED => WriteFailureKind::Auth,
                    StatusCode::CONFLICT => WriteFailureKind::Conflict,
                    _ => WriteFailureKind::Rejected,
                };
                SyncError::WriteFailure {
                    kind,
                    status: Some(status),
                    body,
                }
            }
            StoreError::Reqwest(e) => SyncError::WriteFailure {
                kind: WriteFailureKind::Rejected,
                status: e.status(),
                body: e.to_string(),
            },
            StoreError::Payload(body) => SyncError::WriteFailure {
                kind: WriteFailureKind::Rejected,
                status: None,
                body,
            },
        }
    }
}

impl From<ResolveError> for SyncError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::UnsupportedLanguage(language) => {
                SyncError::UnsupportedLanguage { language }
            }
            ResolveError::Unclassified => SyncError::ClassificationUnknown {
                label: String::new(),
            },
        }
    }
}

/// Outcome of checking a destination and its credential.
#[derive(Debug, ThisError)]
pub enum VerifyError {
    #[error(transparent)]
    Config(SyncError),

    #[error("Invalid access token")]
    InvalidCredential,

    #[error("The token does not have access to this repository")]
    InsufficientAccess,

    #[error("Repository not found")]
    DestinationNotFound,

    #[error("Verification failed ({}): {}", status_label(.status), preview(.body))]
    Failed {
        status: Option<StatusCode>,
        body: String,
    },
}

impl From<StoreError> for VerifyError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Status { status, body } => match status {
                StatusCode::UNAUTHORIZED => VerifyError::InvalidCredential,
                StatusCode::FORBIDDEN => VerifyError::InsufficientAccess,
                StatusCode::NOT_FOUND => VerifyError::DestinationNotFound,
                _ => VerifyError::Failed {
                    status: Some(status),
                    body,
                },
            },
            other => VerifyError::Failed {
                status: other.status(),
                body: other.to_string(),
            },
        }
    }
}

fn status_label(status: &Option<StatusCode>) -> String {
    status.map_or_else(|| "network error".to_string(), |s| s.as_u16().to_string())
}

/// Upstream message when the body is the usual JSON envelope, truncated raw text otherwise.
fn preview(body: &str) -> String {
    let message = GithubErrorBody::from_raw(body).message;
    format!("{:.len$}", message, len = UPSTREAM_BODY_PREVIEW_CHARS)
}

fn write_failure_message(
    kind: &WriteFailureKind,
    status: &Option<StatusCode>,
    body: &str,
) -> String {
    match kind {
        WriteFailureKind::Auth => {
            "GitHub rejected the access token; update it and sync again".to_string()
        }
        WriteFailureKind::Conflict => {
            "The file changed on GitHub while syncing; sync again to retry".to_string()
        }
        WriteFailureKind::Rejected => format!(
            "GitHub rejected the write ({}): {}",
            status_label(status),
            preview(body)
        ),
    }
}
