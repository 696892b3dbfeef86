//! Configuration data model.
//!
//! Read from TOML. Every field has a sensible default so the application works out of the box.

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the prediction service lives and how long to wait for it.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// UI appearance settings.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    /// Entries kept in the activity panel before the oldest are dropped.
    #[serde(default = "default_max_activity")]
    pub max_activity: usize,
}

impl UiConfig {
    /// False when chrono cannot render `timestamp_format`.
    pub fn timestamp_format_is_valid(&self) -> bool {
        !StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error))
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            max_activity: default_max_activity(),
        }
    }
}

/// Estimation behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct BehaviorConfig {
    /// Re-estimate after every edit once all fields are filled.
    #[serde(default = "default_true")]
    pub auto_estimate: bool,
    /// Ignore a response older than the one already displayed. When off,
    /// whichever response arrives last wins.
    #[serde(default)]
    pub discard_stale_responses: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            auto_estimate: true,
            discard_stale_responses: false,
        }
    }
}

/// Diagnostic log file settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
pub(crate) fn default_timestamp_format() -> String {
    "%H:%M:%S".to_string()
}
fn default_max_activity() -> usize {
    200
}
fn default_log_dir() -> String {
    "~/.local/share/houseprice/logs".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.service.base_url, "http://127.0.0.1:5000");
        assert_eq!(cfg.service.timeout(), Duration::from_secs(10));
        assert!(cfg.behavior.auto_estimate);
        assert!(!cfg.behavior.discard_stale_responses);
        assert!(cfg.logging.enabled);
        assert_eq!(cfg.ui.max_activity, 200);
    }

    #[test]
    fn test_partial_sections() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [service]
            base_url = "https://bhp.example.org"

            [behavior]
            discard_stale_responses = true
            "#,
        )
        .unwrap();
        assert_eq!(cfg.service.base_url, "https://bhp.example.org");
        assert_eq!(cfg.service.timeout_secs, 10);
        assert!(cfg.behavior.auto_estimate);
        assert!(cfg.behavior.discard_stale_responses);
    }

    #[test]
    fn test_timestamp_format_validity() {
        let mut ui = UiConfig::default();
        assert!(ui.timestamp_format_is_valid());
        ui.timestamp_format = "%Y-%m-%d %H:%M".into();
        assert!(ui.timestamp_format_is_valid());
        ui.timestamp_format = "%Q".into();
        assert!(!ui.timestamp_format_is_valid());
    }
}
