use std::sync::Arc;
use tracing::debug;

use super::{AcceptedEvent, AcceptedSink, SessionId};
use crate::sync::SyncService;

/// Runs each accepted verdict through the sync service on its own task.
#[derive(Clone)]
pub struct SyncDispatcher {
    service: Arc<SyncService>,
}

impl SyncDispatcher {
    pub fn new(service: Arc<SyncService>) -> Self {
        Self { service }
    }
}

impl AcceptedSink for SyncDispatcher {
    fn dispatch(&self, page: SessionId, accepted: AcceptedEvent) {
        let service = self.service.clone();
        tokio::spawn(async move {
            let outcome = service.on_accepted(&page, accepted).await;
            debug!(%page, ?outcome, "Sync run finished");
        });
    }
}
