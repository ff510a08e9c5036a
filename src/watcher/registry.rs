use ahash::AHashMap;
use solvesync_schema::HostSignal;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::{AcceptedSink, SessionId, WatcherHandle, WatcherState};
use crate::error::BridgeError;

/// Open page sessions and their watchers.
pub struct SessionRegistry {
    sessions: RwLock<AHashMap<SessionId, WatcherHandle>>,
    sink: Arc<dyn AcceptedSink>,
}

impl SessionRegistry {
    pub fn new(sink: Arc<dyn AcceptedSink>) -> Self {
        Self {
            sessions: RwLock::new(AHashMap::new()),
            sink,
        }
    }

    pub async fn open(
        &self,
        page: SessionId,
        slug: Option<String>,
        observer: bool,
    ) -> Result<(), BridgeError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&page) {
            return Err(BridgeError::SessionExists(page.to_string()));
        }
        let handle = WatcherHandle::spawn(page.clone(), slug, observer, self.sink.clone()).await?;
        sessions.insert(page.clone(), handle);
        info!(%page, observer, open = sessions.len(), "Session opened");
        Ok(())
    }

    pub async fn signal(&self, page: &SessionId, signal: HostSignal) -> Result<(), BridgeError> {
        self.handle(page).await?.signal(signal)
    }

    pub async fn state(&self, page: &SessionId) -> Result<WatcherState, BridgeError> {
        self.handle(page).await?.state().await
    }

    pub async fn close(&self, page: &SessionId) -> Result<(), BridgeError> {
        let handle = self
            .sessions
            .write()
            .await
            .remove(page)
            .ok_or_else(|| BridgeError::UnknownSession(page.to_string()))?;
        handle.stop();
        info!(%page, "Session closed");
        Ok(())
    }

    pub async fn contains(&self, page: &SessionId) -> bool {
        self.sessions.read().await.contains_key(page)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn handle(&self, page: &SessionId) -> Result<WatcherHandle, BridgeError> {
        self.sessions
            .read()
            .await
            .get(page)
            .cloned()
            .ok_or_else(|| BridgeError::UnknownSession(page.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watcher::AcceptedEvent;

    struct Discard;

    impl AcceptedSink for Discard {
        fn dispatch(&self, _page: SessionId, _accepted: AcceptedEvent) {}
    }

    #[tokio::test]
    async fn open_signal_close_lifecycle() {
        let registry = SessionRegistry::new(Arc::new(Discard));
        let page = SessionId::from("tab");

        registry
            .open(page.clone(), Some("two-sum".to_string()), true)
            .await
            .expect("open");
        assert!(matches!(
            registry.open(page.clone(), None, true).await,
            Err(BridgeError::SessionExists(_))
        ));

        registry
            .signal(&page, HostSignal::SubmitClicked)
            .await
            .expect("signal");
        assert!(matches!(
            registry.state(&page).await.expect("state").phase(),
            crate::watcher::Phase::Pending { .. }
        ));

        registry.close(&page).await.expect("close");
        assert!(!registry.contains(&page).await);
        assert!(matches!(
            registry.signal(&page, HostSignal::SubmitClicked).await,
            Err(BridgeError::UnknownSession(_))
        ));
    }
}
