use crate::classify::Classification;
use chrono::{DateTime, SecondsFormat, Utc};

/// Identifier written into every synced file.
pub const SYNCHRONIZER_ID: &str = "solvesync";

/// Everything the header depends on. No hidden inputs: the clock is passed in.
#[derive(Debug, Clone)]
pub struct HeaderInput<'a> {
    pub slug: &'a str,
    pub classification: &'a Classification,
    pub raw_language_label: &'a str,
    pub source_location: &'a str,
    pub now: DateTime<Utc>,
}

pub fn comment_prefix(classification: &Classification) -> &'static str {
    match classification {
        Classification::Sql { .. } => "--",
        Classification::Tabular => "#",
        Classification::Code { language } if language == "python" => "#",
        _ => "//",
    }
}

/// `two-sum` -> `Two Sum`.
pub fn humanize_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prepends the descriptive comment block to `code`.
pub fn compose(input: &HeaderInput<'_>, code: &str) -> String {
    let prefix = comment_prefix(input.classification);
    let lines = [
        format!("Problem: {}", humanize_slug(input.slug)),
        format!(
            "Language: {} ({})",
            input.classification.canonical_label(),
            input.raw_language_label.trim()
        ),
        format!("Source: {}", input.source_location),
        format!("Synced by: {SYNCHRONIZER_ID}"),
        format!(
            "Timestamp: {}",
            input.now.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
    ];

    let mut out = String::with_capacity(code.len() + 256);
    for line in &lines {
        out.push_str(prefix);
        out.push(' ');
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(code);
    out
}
