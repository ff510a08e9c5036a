mod basic;
mod github;
mod source;

pub use basic::BasicConfig;
pub use github::GithubConfig;
pub use source::SourceConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Daemon settings (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Destination repository and upstream client settings (see `github` table).
    #[serde(default)]
    pub github: GithubConfig,

    /// Problem page settings (see `source` table).
    #[serde(default)]
    pub source: SourceConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "SOLVESYNC_";

impl Config {
    /// Builds a Figment that merges defaults, `config.toml` if present, then `SOLVESYNC_*`
    /// environment variables (`__` separates nested keys, e.g. `SOLVESYNC_GITHUB__ACCESS_TOKEN`).
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    /// Same as [`Config::load`], panicking on a malformed source. Startup only.
    pub fn from_optional_toml() -> Self {
        Self::load().unwrap_or_else(|err| {
            panic!("failed to extract configuration (defaults + optional config.toml + env): {err}")
        })
    }
}

/// Global, lazily-initialized configuration instance.
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::from_optional_toml);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_auto_sync_and_point_at_public_api() {
        let cfg = Config::default();
        assert!(cfg.github.auto_sync);
        assert_eq!(cfg.github.api_base.as_str(), "https://api.github.com/");
        assert_eq!(cfg.basic.listen_port, 8190);
        assert!(cfg.basic.bridge_key.is_empty());
        assert_eq!(
            cfg.source.problem_base_url.as_str(),
            "https://leetcode.com/problems/"
        );
    }

    #[test]
    fn toml_overrides_merge_over_defaults() {
        let cfg: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(
                r#"
                [basic]
                listen_port = 9000

                [github]
                owner = "octo"
                repo_name = "solutions"
                auto_sync = false
                "#,
            ))
            .extract()
            .expect("extract config");

        assert_eq!(cfg.basic.listen_port, 9000);
        assert_eq!(cfg.basic.loglevel, "info");
        assert_eq!(cfg.github.owner.as_deref(), Some("octo"));
        assert_eq!(cfg.github.repo_name.as_deref(), Some("solutions"));
        assert!(cfg.github.access_token.is_none());
        assert!(!cfg.github.auto_sync);
    }
}
