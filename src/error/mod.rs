mod bridge;
mod store;
mod sync;

pub use bridge::{ApiErrorBody, ApiErrorObject, BridgeError};
pub use store::StoreError;
pub use sync::{SyncError, VerifyError, WriteFailureKind};

/// Upstream bodies are truncated to this many characters in logs and messages.
pub const UPSTREAM_BODY_PREVIEW_CHARS: usize = 300;
