//! Per-page submission watchers.
//!
//! Each bridge session owns one [`WatcherHandle`]: a ractor actor that feeds host signals
//! through the pure [`WatcherState`] machine and hands accepted verdicts to an
//! [`AcceptedSink`].

mod actor;
mod dispatch;
mod registry;
mod state;

pub use actor::{AcceptedSink, WatcherHandle};
pub use dispatch::SyncDispatcher;
pub use registry::SessionRegistry;
pub use state::{AcceptedEvent, Phase, Step, WatcherState};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one page session opened by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
