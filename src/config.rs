use std::path::Path;

use error_stack::{Report, ResultExt};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::publish::SinkKind;

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "text".into()
}

fn default_coins_file() -> String {
    "coins.txt".into()
}

fn default_base_url() -> String {
    "https://api.coingecko.com/api/v3".into()
}

fn default_sink() -> String {
    "redis".into()
}

fn default_topic() -> String {
    "coin-updates".into()
}

fn default_subject() -> String {
    "Cryptocurrency Update".into()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".into()
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub publish: PublishConfig,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Accepted values: `"text"` | `"json"`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    /// Plain-text coin list, one CoinGecko asset id per line.
    #[serde(default = "default_coins_file")]
    pub coins_file: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            coins_file: default_coins_file(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PublishConfig {
    /// Accepted values: `"redis"` | `"terminal"`
    #[serde(default = "default_sink")]
    pub sink: String,
    #[serde(default = "default_topic")]
    pub topic: String,
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            sink: default_sink(),
            topic: default_topic(),
            subject: default_subject(),
            redis_url: default_redis_url(),
        }
    }
}

/// Load an `AppConfig` from a TOML file at `path`, apply the documented
/// environment overrides, and validate the result.
pub fn load(path: &Path) -> Result<AppConfig, Report<ConfigError>> {
    let content = std::fs::read_to_string(path)
        .change_context(ConfigError::ReadFile)
        .attach_with(|| format!("path: {}", path.display()))?;

    let mut config: AppConfig = toml::from_str(&content).change_context(ConfigError::Parse {
        reason: "invalid TOML syntax or schema mismatch".into(),
    })?;

    apply_env_overrides(&mut config);
    validate(&config)?;

    Ok(config)
}

/// Apply environment overrides on top of the file config.
///
/// `COIN_TOPIC` overrides `publish.topic`; `REDIS_URL` overrides
/// `publish.redis_url`.
fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(topic) = std::env::var("COIN_TOPIC") {
        config.publish.topic = topic;
    }
    if let Ok(url) = std::env::var("REDIS_URL") {
        config.publish.redis_url = url;
    }
}

fn validate(config: &AppConfig) -> Result<(), Report<ConfigError>> {
    if SinkKind::from_str(&config.publish.sink).is_none() {
        return Err(Report::new(ConfigError::Validation {
            field: format!("publish.sink \"{}\" is not valid", config.publish.sink),
        }));
    }

    for (field, value) in [
        ("source.coins_file", &config.source.coins_file),
        ("market.base_url", &config.market.base_url),
        ("publish.topic", &config.publish.topic),
        ("publish.subject", &config.publish.subject),
        ("publish.redis_url", &config.publish.redis_url),
    ] {
        if value.trim().is_empty() {
            return Err(Report::new(ConfigError::Validation {
                field: format!("{field} must not be empty"),
            }));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> AppConfig {
        toml::from_str(toml).expect("parse failed")
    }

    #[test]
    fn valid_full_config_parses() {
        let toml = r#"
[general]
log_level = "debug"
log_format = "json"

[source]
coins_file = "/etc/coin-publisher/coins.txt"

[market]
base_url = "https://api.coingecko.com/api/v3"

[publish]
sink = "redis"
topic = "crypto.updates"
subject = "Cryptocurrency Update"
redis_url = "redis://cache:6379"
"#;
        let config = parse(toml);
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.source.coins_file, "/etc/coin-publisher/coins.txt");
        assert_eq!(config.publish.topic, "crypto.updates");
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn defaults_applied_when_fields_omitted() {
        let config = parse("");
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "text");
        assert_eq!(config.source.coins_file, "coins.txt");
        assert_eq!(config.market.base_url, "https://api.coingecko.com/api/v3");
        assert_eq!(config.publish.sink, "redis");
        assert_eq!(config.publish.topic, "coin-updates");
        assert_eq!(config.publish.subject, "Cryptocurrency Update");
        assert_eq!(config.publish.redis_url, "redis://localhost:6379");
    }

    #[test]
    fn unknown_sink_rejected() {
        let toml = r#"
[publish]
sink = "carrier-pigeon"
"#;
        let config = parse(toml);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn empty_topic_rejected() {
        let toml = r#"
[publish]
topic = ""
"#;
        let config = parse(toml);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn empty_coins_file_rejected() {
        let toml = r#"
[source]
coins_file = "  "
"#;
        let config = parse(toml);
        assert!(validate(&config).is_err());
    }
}
