use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "DRAFTER_API_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_NOTIFICATION_TTL_MS: u64 = 4000;
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct DrafterConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct NotificationConfig {
    /// How long a notification stays visible, in milliseconds.
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
}

impl NotificationConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_ttl_ms() -> u64 {
    DEFAULT_NOTIFICATION_TTL_MS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: DrafterConfig = toml::from_str("").unwrap();
        assert_eq!(config, DrafterConfig::default());
        assert_eq!(config.notifications.ttl(), Duration::from_secs(4));
        assert_eq!(config.api.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: DrafterConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://drafts.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://drafts.example.com");
        assert_eq!(config.api.timeout_secs, 60);
        assert_eq!(config.log.level, "warn");
    }
}
