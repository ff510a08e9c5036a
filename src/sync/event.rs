use chrono::{DateTime, Utc};
use solvesync_core::{Classification, humanize_slug};

/// One accepted submission, as handed to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionEvent {
    pub slug: String,
    pub raw_language_label: String,
    pub raw_code: String,
    pub difficulty: Option<String>,
    pub source_url: String,
    pub detected_at: DateTime<Utc>,
}

/// A submission after classification, path resolution and header composition.
///
/// Kept as the re-entry point for manual sync; the composed content is reused verbatim.
#[derive(Debug, Clone)]
pub struct StagedSubmission {
    pub event: SubmissionEvent,
    pub classification: Classification,
    pub path: String,
    pub content: String,
}

impl StagedSubmission {
    /// `Add Two Sum (python) [Easy]` on create, `Update ...` on update.
    pub fn commit_message(&self, updating: bool) -> String {
        let verb = if updating { "Update" } else { "Add" };
        let mut message = format!(
            "{verb} {} ({})",
            humanize_slug(&self.event.slug),
            self.classification.canonical_label()
        );
        if let Some(difficulty) = self
            .event
            .difficulty
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
        {
            message.push_str(&format!(" [{difficulty}]"));
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvesync_core::classify;

    fn staged(difficulty: Option<&str>) -> StagedSubmission {
        StagedSubmission {
            event: SubmissionEvent {
                slug: "two-sum".to_string(),
                raw_language_label: "Python3".to_string(),
                raw_code: "pass".to_string(),
                difficulty: difficulty.map(str::to_string),
                source_url: "https://leetcode.com/problems/two-sum/".to_string(),
                detected_at: Utc::now(),
            },
            classification: classify("Python3"),
            path: "python/two_sum.py".to_string(),
            content: "pass".to_string(),
        }
    }

    #[test]
    fn commit_message_reflects_create_or_update() {
        assert_eq!(staged(None).commit_message(false), "Add Two Sum (python)");
        assert_eq!(
            staged(Some("Easy")).commit_message(true),
            "Update Two Sum (python) [Easy]"
        );
        assert_eq!(staged(Some("  ")).commit_message(true), "Update Two Sum (python)");
    }
}
