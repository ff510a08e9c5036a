use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use solvesync_schema::HostSignal;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{AcceptedEvent, SessionId, Step, WatcherState};
use crate::error::BridgeError;

/// Receives accepted verdicts. Must not block: the watcher handles signals one at a time.
pub trait AcceptedSink: Send + Sync + 'static {
    fn dispatch(&self, page: SessionId, accepted: AcceptedEvent);
}

#[derive(Debug)]
pub enum WatcherMessage {
    Signal(HostSignal),
    /// Copy of the current state, for status and tests.
    Inspect(RpcReplyPort<WatcherState>),
}

/// Handle for one session's watcher actor.
#[derive(Clone)]
pub struct WatcherHandle {
    actor: ActorRef<WatcherMessage>,
}

impl WatcherHandle {
    /// Starts a watcher. Without an observer capability the watcher stays inert.
    pub async fn spawn(
        page: SessionId,
        slug: Option<String>,
        observer: bool,
        sink: Arc<dyn AcceptedSink>,
    ) -> Result<Self, BridgeError> {
        let state = if observer {
            WatcherState::new(slug)
        } else {
            WatcherState::inert()
        };
        let (actor, _jh) = Actor::spawn(None, WatcherActor, (page.clone(), state, sink))
            .await
            .map_err(|e| BridgeError::RactorError(format!("spawn watcher {page}: {e}")))?;
        Ok(Self { actor })
    }

    pub fn signal(&self, signal: HostSignal) -> Result<(), BridgeError> {
        ractor::cast!(self.actor, WatcherMessage::Signal(signal))
            .map_err(|e| BridgeError::RactorError(format!("Signal cast failed: {e}")))
    }

    pub async fn state(&self) -> Result<WatcherState, BridgeError> {
        ractor::call!(self.actor, WatcherMessage::Inspect)
            .map_err(|e| BridgeError::RactorError(format!("Inspect RPC failed: {e}")))
    }

    pub fn stop(&self) {
        self.actor.stop(Some("session closed".to_string()));
    }
}

struct WatcherActorState {
    page: SessionId,
    state: WatcherState,
    sink: Arc<dyn AcceptedSink>,
}

struct WatcherActor;

#[ractor::async_trait]
impl Actor for WatcherActor {
    type Msg = WatcherMessage;
    type State = WatcherActorState;
    type Arguments = (SessionId, WatcherState, Arc<dyn AcceptedSink>);

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        (page, state, sink): Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        if state.is_inert() {
            warn!(%page, "Host has no result observer; watcher stays inert");
        } else {
            debug!(%page, slug = ?state.slug(), "Watcher started");
        }
        Ok(WatcherActorState { page, state, sink })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            WatcherMessage::Signal(signal) => {
                let step = state.state.apply(&signal);
                Self::report(state, step);
            }
            WatcherMessage::Inspect(rp) => {
                let _ = rp.send(state.state.clone());
            }
        }
        Ok(())
    }
}

impl WatcherActor {
    fn report(state: &WatcherActorState, step: Step) {
        let page = &state.page;
        match step {
            Step::Accepted(accepted) => {
                info!(
                    %page,
                    slug = %accepted.slug,
                    result_id = %accepted.result_id,
                    "Accepted verdict"
                );
                state.sink.dispatch(page.clone(), accepted);
            }
            Step::NoProblem => {
                warn!(%page, "Submit triggered before any problem was tracked; ignoring");
            }
            Step::Armed { slug } => debug!(%page, %slug, "Submit triggered"),
            Step::Rejected { verdict } => debug!(%page, %verdict, "Non-accepted verdict"),
            Step::Discarded { previous, current } => {
                info!(%page, %previous, %current, "Problem changed while pending; discarded");
            }
            Step::Tracked { slug } => debug!(%page, %slug, "Tracking problem"),
            Step::Duplicate { result_id } => debug!(%page, %result_id, "Duplicate verdict"),
            Step::Recorded { result_id } => {
                debug!(%page, %result_id, "Verdict without pending submit recorded");
            }
            Step::Inert | Step::Ignored => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Collect(Mutex<Vec<(SessionId, AcceptedEvent)>>);

    impl AcceptedSink for Collect {
        fn dispatch(&self, page: SessionId, accepted: AcceptedEvent) {
            self.0.lock().expect("lock").push((page, accepted));
        }
    }

    fn result(id: &str, text: &str) -> HostSignal {
        HostSignal::ResultShown {
            result_id: id.to_string(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn signals_are_applied_in_order_and_accepted_is_dispatched_once() {
        let sink = Arc::new(Collect::default());
        let handle = WatcherHandle::spawn(
            SessionId::from("tab-1"),
            Some("two-sum".to_string()),
            true,
            sink.clone(),
        )
        .await
        .expect("spawn");

        handle.signal(HostSignal::SubmitClicked).expect("cast");
        handle.signal(result("r1", "Accepted")).expect("cast");
        handle.signal(result("r1", "Accepted")).expect("cast");

        // The call is queued behind the casts, so all three are applied.
        let state = handle.state().await.expect("state");
        assert_eq!(state.last_result_id(), Some("r1"));

        let seen = sink.0.lock().expect("lock").clone();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, SessionId::from("tab-1"));
        assert_eq!(seen[0].1.slug, "two-sum");
        handle.stop();
    }

    #[tokio::test]
    async fn watcher_without_observer_is_inert() {
        let sink = Arc::new(Collect::default());
        let handle = WatcherHandle::spawn(
            SessionId::from("tab-2"),
            Some("two-sum".to_string()),
            false,
            sink.clone(),
        )
        .await
        .expect("spawn");

        handle.signal(HostSignal::SubmitClicked).expect("cast");
        handle.signal(result("r1", "Accepted")).expect("cast");

        assert!(handle.state().await.expect("state").is_inert());
        assert!(sink.0.lock().expect("lock").is_empty());
        handle.stop();
    }
}
