use reqwest::StatusCode;
use solvesync_schema::GithubErrorBody;

use crate::error::UPSTREAM_BODY_PREVIEW_CHARS;

/// Logs a non-success upstream body at DEBUG: pretty JSON when it parses as the GitHub error
/// envelope, a truncated preview otherwise. Does nothing unless DEBUG is enabled.
pub(crate) fn debug_upstream_body(operation: &'static str, status: StatusCode, raw_body: &str) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    match serde_json::from_str::<GithubErrorBody>(raw_body) {
        Ok(error) => {
            let pretty = serde_json::to_string_pretty(&error)
                .unwrap_or_else(|e| format!("<pretty serialize failed: {e}>"));
            tracing::debug!(
                operation,
                %status,
                message = %error.message,
                body = %pretty,
                "GitHub structured error"
            );
        }
        Err(_) => {
            tracing::debug!(
                operation,
                %status,
                body = %format!("{:.len$}", raw_body, len = UPSTREAM_BODY_PREVIEW_CHARS),
                "GitHub unstructured error"
            );
        }
    }
}
