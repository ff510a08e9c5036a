use ahash::AHashSet;
use solvesync_schema::HostSignal;
use std::collections::VecDeque;

/// Verdict texts the host shows while a submission is still being judged.
const NON_TERMINAL_VERDICTS: &[&str] = &["", "Pending", "Judging", "Running"];

const ACCEPTED_VERDICT: &str = "Accepted";

/// Processed result identities kept per session; the oldest are forgotten first.
const PROCESSED_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// A submit was triggered for `slug`; waiting for its verdict.
    Pending { slug: String },
}

/// Emitted exactly once per accepted result identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedEvent {
    pub slug: String,
    pub result_id: String,
}

/// What one signal did to the watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The session has no observer capability.
    Inert,
    Ignored,
    /// A submit arrived before any problem was tracked.
    NoProblem,
    Armed { slug: String },
    Duplicate { result_id: String },
    /// A terminal verdict seen while idle; remembered so it can never emit later.
    Recorded { result_id: String },
    Accepted(AcceptedEvent),
    Rejected { verdict: String },
    Discarded { previous: String, current: String },
    Tracked { slug: String },
}

/// Result identities already acted on, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ProcessedIds {
    order: VecDeque<String>,
    seen: AHashSet<String>,
}

impl ProcessedIds {
    fn contains(&self, result_id: &str) -> bool {
        self.seen.contains(result_id)
    }

    fn insert(&mut self, result_id: &str) {
        if !self.seen.insert(result_id.to_string()) {
            return;
        }
        self.order.push_back(result_id.to_string());
        while self.order.len() > PROCESSED_CAPACITY {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
    }

    fn last(&self) -> Option<&str> {
        self.order.back().map(String::as_str)
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// Per-session watcher state. Pure: every transition goes through [`WatcherState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherState {
    phase: Phase,
    slug: Option<String>,
    processed: ProcessedIds,
    inert: bool,
}

impl WatcherState {
    pub fn new(slug: Option<String>) -> Self {
        Self {
            phase: Phase::Idle,
            slug: slug.filter(|s| !s.trim().is_empty()),
            processed: ProcessedIds::default(),
            inert: false,
        }
    }

    /// A watcher that ignores every signal.
    pub fn inert() -> Self {
        Self {
            inert: true,
            ..Self::new(None)
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    pub fn last_result_id(&self) -> Option<&str> {
        self.processed.last()
    }

    pub fn has_processed(&self, result_id: &str) -> bool {
        self.processed.contains(result_id)
    }

    pub fn is_inert(&self) -> bool {
        self.inert
    }

    pub fn apply(&mut self, signal: &HostSignal) -> Step {
        if self.inert {
            return Step::Inert;
        }

        match signal {
            HostSignal::SubmitClicked => self.arm(),
            HostSignal::KeyChord(chord) if chord.is_submit_shortcut() => self.arm(),
            HostSignal::KeyChord(_) => Step::Ignored,
            HostSignal::ResultShown { result_id, text } => self.observe_result(result_id, text),
            HostSignal::ProblemChanged { slug } => self.track(slug),
        }
    }

    fn arm(&mut self) -> Step {
        let Some(slug) = self.slug.clone() else {
            return Step::NoProblem;
        };
        self.phase = Phase::Pending { slug: slug.clone() };
        Step::Armed { slug }
    }

    fn observe_result(&mut self, result_id: &str, text: &str) -> Step {
        let verdict = text.trim();
        if NON_TERMINAL_VERDICTS.contains(&verdict) {
            return Step::Ignored;
        }
        if self.processed.contains(result_id) {
            return Step::Duplicate {
                result_id: result_id.to_string(),
            };
        }
        self.processed.insert(result_id);

        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => Step::Recorded {
                result_id: result_id.to_string(),
            },
            Phase::Pending { slug } if verdict == ACCEPTED_VERDICT => {
                Step::Accepted(AcceptedEvent {
                    slug,
                    result_id: result_id.to_string(),
                })
            }
            Phase::Pending { .. } => Step::Rejected {
                verdict: verdict.to_string(),
            },
        }
    }

    fn track(&mut self, slug: &str) -> Step {
        let slug = slug.trim();
        if slug.is_empty() || self.slug.as_deref() == Some(slug) {
            return Step::Ignored;
        }
        self.slug = Some(slug.to_string());

        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Pending { slug: previous } => Step::Discarded {
                previous,
                current: slug.to_string(),
            },
            Phase::Idle => Step::Tracked {
                slug: slug.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvesync_schema::KeyChord;

    fn result(id: &str, text: &str) -> HostSignal {
        HostSignal::ResultShown {
            result_id: id.to_string(),
            text: text.to_string(),
        }
    }

    fn chord(key: &str, ctrl: bool, meta: bool, alt: bool) -> HostSignal {
        HostSignal::KeyChord(KeyChord {
            key: key.to_string(),
            ctrl,
            meta,
            shift: false,
            alt,
        })
    }

    fn problem(slug: &str) -> HostSignal {
        HostSignal::ProblemChanged {
            slug: slug.to_string(),
        }
    }

    fn watching(slug: &str) -> WatcherState {
        WatcherState::new(Some(slug.to_string()))
    }

    #[test]
    fn submit_then_accepted_emits_once() {
        let mut state = watching("two-sum");

        assert_eq!(
            state.apply(&HostSignal::SubmitClicked),
            Step::Armed {
                slug: "two-sum".to_string()
            }
        );
        assert_eq!(state.apply(&result("r1", "Judging")), Step::Ignored);
        assert_eq!(
            state.apply(&result("r1", "  Accepted \n")),
            Step::Accepted(AcceptedEvent {
                slug: "two-sum".to_string(),
                result_id: "r1".to_string(),
            })
        );
        assert_eq!(state.phase(), &Phase::Idle);
        assert_eq!(
            state.apply(&result("r1", "Accepted")),
            Step::Duplicate {
                result_id: "r1".to_string()
            }
        );
    }

    #[test]
    fn only_the_designated_shortcut_arms() {
        let mut state = watching("two-sum");

        assert_eq!(state.apply(&chord("Enter", false, false, false)), Step::Ignored);
        assert_eq!(state.apply(&chord("Enter", true, false, true)), Step::Ignored);
        assert_eq!(state.apply(&chord("s", true, false, false)), Step::Ignored);
        assert_eq!(state.phase(), &Phase::Idle);

        assert!(matches!(
            state.apply(&chord("Enter", false, true, false)),
            Step::Armed { .. }
        ));
    }

    #[test]
    fn stale_verdict_seen_while_idle_cannot_emit_after_next_submit() {
        let mut state = watching("two-sum");

        assert_eq!(
            state.apply(&result("old", "Accepted")),
            Step::Recorded {
                result_id: "old".to_string()
            }
        );
        state.apply(&HostSignal::SubmitClicked);
        assert_eq!(
            state.apply(&result("old", "Accepted")),
            Step::Duplicate {
                result_id: "old".to_string()
            }
        );
        assert!(matches!(state.phase(), Phase::Pending { .. }));

        assert!(matches!(
            state.apply(&result("new", "Accepted")),
            Step::Accepted(_)
        ));
    }

    #[test]
    fn earlier_identity_refiring_after_another_verdict_is_duplicate() {
        let mut state = watching("two-sum");

        state.apply(&HostSignal::SubmitClicked);
        assert!(matches!(
            state.apply(&result("r1", "Accepted")),
            Step::Accepted(_)
        ));
        state.apply(&HostSignal::SubmitClicked);
        assert!(matches!(
            state.apply(&result("r2", "Wrong Answer")),
            Step::Rejected { .. }
        ));
        state.apply(&HostSignal::SubmitClicked);

        assert_eq!(
            state.apply(&result("r1", "Accepted")),
            Step::Duplicate {
                result_id: "r1".to_string()
            }
        );
        assert!(matches!(state.phase(), Phase::Pending { .. }));
        assert!(state.has_processed("r2"));
    }

    #[test]
    fn processed_identities_are_bounded_oldest_first() {
        let mut state = watching("two-sum");
        for n in 0..=PROCESSED_CAPACITY {
            state.apply(&result(&format!("r{n}"), "Wrong Answer"));
        }

        assert_eq!(state.processed.len(), PROCESSED_CAPACITY);
        assert!(!state.has_processed("r0"));
        assert!(state.has_processed("r1"));
        assert_eq!(
            state.last_result_id(),
            Some(format!("r{PROCESSED_CAPACITY}").as_str())
        );
    }

    #[test]
    fn other_terminal_verdict_returns_to_idle_without_emission() {
        let mut state = watching("two-sum");
        state.apply(&HostSignal::SubmitClicked);

        assert_eq!(
            state.apply(&result("r1", "Wrong Answer")),
            Step::Rejected {
                verdict: "Wrong Answer".to_string()
            }
        );
        assert_eq!(state.phase(), &Phase::Idle);
        assert_eq!(state.last_result_id(), Some("r1"));
    }

    #[test]
    fn non_terminal_texts_are_not_recorded() {
        let mut state = watching("two-sum");
        state.apply(&HostSignal::SubmitClicked);

        for text in ["", "   ", "Pending", "Judging", "Running"] {
            assert_eq!(state.apply(&result("r1", text)), Step::Ignored);
        }
        assert_eq!(state.last_result_id(), None);
        assert!(matches!(
            state.apply(&result("r1", "Accepted")),
            Step::Accepted(_)
        ));
    }

    #[test]
    fn navigation_while_pending_discards() {
        let mut state = watching("two-sum");
        state.apply(&HostSignal::SubmitClicked);

        assert_eq!(state.apply(&problem("two-sum")), Step::Ignored);
        assert!(matches!(state.phase(), Phase::Pending { .. }));

        assert_eq!(
            state.apply(&problem("add-two-numbers")),
            Step::Discarded {
                previous: "two-sum".to_string(),
                current: "add-two-numbers".to_string(),
            }
        );
        assert_eq!(state.phase(), &Phase::Idle);
        assert_eq!(state.slug(), Some("add-two-numbers"));
        assert!(matches!(
            state.apply(&result("r1", "Accepted")),
            Step::Recorded { .. }
        ));
    }

    #[test]
    fn submit_without_problem_is_ignored() {
        let mut state = WatcherState::new(None);

        assert_eq!(state.apply(&HostSignal::SubmitClicked), Step::NoProblem);
        assert_eq!(state.phase(), &Phase::Idle);

        assert_eq!(
            state.apply(&problem("valid-anagram")),
            Step::Tracked {
                slug: "valid-anagram".to_string()
            }
        );
        assert!(matches!(
            state.apply(&HostSignal::SubmitClicked),
            Step::Armed { .. }
        ));
    }

    #[test]
    fn inert_watcher_ignores_everything() {
        let mut state = WatcherState::inert();

        for signal in [
            problem("two-sum"),
            HostSignal::SubmitClicked,
            result("r1", "Accepted"),
        ] {
            assert_eq!(state.apply(&signal), Step::Inert);
        }
        assert_eq!(state.slug(), None);
        assert_eq!(state.last_result_id(), None);
    }
}
