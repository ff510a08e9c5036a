use serde::{Deserialize, Serialize};

/// A keyboard chord observed on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeyChord {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
}

impl KeyChord {
    /// `Ctrl+Enter` / `Cmd+Enter`, the page's submit shortcut.
    pub fn is_submit_shortcut(&self) -> bool {
        self.key.eq_ignore_ascii_case("enter") && (self.ctrl || self.meta) && !self.alt
    }
}

/// One notification delivered by the in-page host agent.
///
/// The host makes no promise about batching or ordering; each signal is handled on its own.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostSignal {
    /// The designated submit control was activated.
    SubmitClicked,

    KeyChord(KeyChord),

    /// A verdict-bearing element was rendered or updated.
    ///
    /// `result_id` identifies the element instance, not its text; the same instance may be
    /// reported many times.
    ResultShown { result_id: String, text: String },

    /// In-page navigation moved to another problem.
    ProblemChanged { slug: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn signals_use_snake_case_type_tag() {
        let parsed: HostSignal = serde_json::from_value(json!({
            "type": "result_shown",
            "result_id": "r-1",
            "text": "Accepted"
        }))
        .expect("parse");
        assert_eq!(
            parsed,
            HostSignal::ResultShown {
                result_id: "r-1".to_string(),
                text: "Accepted".to_string()
            }
        );

        let parsed: HostSignal =
            serde_json::from_value(json!({ "type": "key_chord", "key": "Enter", "ctrl": true }))
                .expect("parse");
        let HostSignal::KeyChord(chord) = parsed else {
            panic!("expected key chord");
        };
        assert!(chord.is_submit_shortcut());
    }

    #[test]
    fn only_modified_enter_is_submit_shortcut() {
        let chord = |key: &str, ctrl, meta, alt| KeyChord {
            key: key.to_string(),
            ctrl,
            meta,
            shift: false,
            alt,
        };

        assert!(chord("Enter", false, true, false).is_submit_shortcut());
        assert!(!chord("Enter", false, false, false).is_submit_shortcut());
        assert!(!chord("Enter", true, false, true).is_submit_shortcut());
        assert!(!chord("'", true, false, false).is_submit_shortcut());
    }
}
