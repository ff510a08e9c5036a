pub mod config;
pub mod error;
pub mod github;
pub mod server;
pub mod store;
pub mod sync;
pub(crate) mod utils;
pub mod watcher;

pub use error::{BridgeError, StoreError, SyncError, VerifyError};
