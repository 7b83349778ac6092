//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use verse_rank_domain::RankingWeights;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub ranking: RankingWeights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_feed_path")]
    pub feed_path: PathBuf,

    #[serde(default = "default_strategy")]
    pub default_strategy: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_limit: Option<usize>,
}

// Default value functions
fn default_feed_path() -> PathBuf {
    PathBuf::from("./feed.json")
}

fn default_strategy() -> String {
    "hot".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            feed_path: default_feed_path(),
            default_strategy: default_strategy(),
            log_level: default_log_level(),
            default_limit: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("VERSE_RANK")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# verse-rank configuration

[general]
feed_path = "./feed.json"
# hot, new, top, rising (anything else ranks as hot)
default_strategy = "hot"
# Overridden by --log-level and RUST_LOG
log_level = "info"
# default_limit = 50

# Hot score weights. The top ordering always uses 1 / 2 / 1.5.
[ranking]
upvotes = 1.0
comments = 2.0
saves = 1.5
new_voice_boost = 1.5
rising_boost = 1.3
decay_factor = 1.8
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_toml_parses_to_defaults() {
        let parsed: AppConfig = toml::from_str(&AppConfig::example_toml()).unwrap();

        assert_eq!(parsed.general.feed_path, default_feed_path());
        assert_eq!(parsed.general.default_strategy, "hot");
        assert_eq!(parsed.general.log_level, default_log_level());
        assert_eq!(parsed.general.default_limit, None);
        assert_eq!(parsed.ranking, RankingWeights::default());
    }

    #[test]
    fn test_partial_ranking_section() {
        let parsed: AppConfig = toml::from_str("[ranking]\ndecay_factor = 1.5\n").unwrap();

        assert_eq!(parsed.ranking.decay_factor, 1.5);
        assert_eq!(parsed.ranking.upvotes, 1.0);
        assert_eq!(parsed.general.default_strategy, "hot");
        assert_eq!(parsed.general.log_level, "info");
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = AppConfig::default();
        let rendered = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();

        assert_eq!(parsed.ranking, config.ranking);
        assert_eq!(parsed.general.feed_path, config.general.feed_path);
    }
}
