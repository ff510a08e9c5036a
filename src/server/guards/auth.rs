use crate::server::router::BridgeState;
use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use serde_json::json;
use subtle::ConstantTimeEq;

pub const X_BRIDGE_KEY: &str = "x-bridge-key";

fn extract_header_token(headers: &HeaderMap) -> Option<String> {
    if let Some(k) = headers.get(X_BRIDGE_KEY).and_then(|v| v.to_str().ok()) {
        return Some(k.to_string());
    }
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}

/// Passes when no bridge key is configured, or when the request presents it.
#[derive(Debug, Clone, Copy)]
pub struct RequireKeyAuth;

impl FromRequestParts<BridgeState> for RequireKeyAuth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &BridgeState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.bridge_key.as_ref();
        if expected.is_empty() {
            return Ok(RequireKeyAuth);
        }

        match extract_header_token(&parts.headers) {
            Some(key) => {
                if key.as_bytes().ct_eq(expected.as_bytes()).into() {
                    Ok(RequireKeyAuth)
                } else {
                    Err(AuthError::InvalidKey)
                }
            }
            None => Err(AuthError::MissingKey),
        }
    }
}

pub enum AuthError {
    MissingKey,
    InvalidKey,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let reason = match self {
            AuthError::MissingKey => "Missing bridge key",
            AuthError::InvalidKey => "Invalid bridge key",
        };
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "unauthorized", "reason": reason })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bridge_key_header_wins_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(X_BRIDGE_KEY, HeaderValue::from_static("from-header"));
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-bearer"),
        );
        assert_eq!(extract_header_token(&headers).as_deref(), Some("from-header"));

        headers.remove(X_BRIDGE_KEY);
        assert_eq!(extract_header_token(&headers).as_deref(), Some("from-bearer"));

        assert_eq!(extract_header_token(&HeaderMap::new()), None);
    }
}
