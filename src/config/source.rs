use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Prefix for problem pages; the slug is appended to build the `Source:` header line.
    /// TOML: `source.problem_base_url`. Default: `https://leetcode.com/problems/`.
    #[serde(default = "default_problem_base_url")]
    pub problem_base_url: Url,
}

impl SourceConfig {
    /// `https://leetcode.com/problems/` + `two-sum` -> `https://leetcode.com/problems/two-sum/`.
    pub fn problem_url(&self, slug: &str) -> String {
        match self.problem_base_url.join(&format!("{slug}/")) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{slug}/", self.problem_base_url),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            problem_base_url: default_problem_base_url(),
        }
    }
}

fn default_problem_base_url() -> Url {
    Url::parse("https://leetcode.com/problems/").expect("invalid fixed problem base URL")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_url_appends_slug_with_trailing_slash() {
        let cfg = SourceConfig::default();
        assert_eq!(
            cfg.problem_url("two-sum"),
            "https://leetcode.com/problems/two-sum/"
        );
    }
}
