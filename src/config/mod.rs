pub mod model;

use anyhow::{Context, Result};
use std::path::PathBuf;

pub use model::{AppConfig, LoggingConfig};

/// Overrides `service.base_url` when set to a non-empty value.
pub const BASE_URL_ENV: &str = "HOUSEPRICE_BASE_URL";

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("houseprice")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    let path = config_path();
    let mut config = if path.exists() {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?
    } else {
        AppConfig::default()
    };
    apply_base_url_override(&mut config, std::env::var(BASE_URL_ENV).ok());
    Ok(config)
}

/// Replace an unrenderable `ui.timestamp_format` with the default.
/// Returns the rejected format.
pub fn reset_invalid_timestamp_format(config: &mut AppConfig) -> Option<String> {
    if config.ui.timestamp_format_is_valid() {
        return None;
    }
    Some(std::mem::replace(
        &mut config.ui.timestamp_format,
        model::default_timestamp_format(),
    ))
}

fn apply_base_url_override(config: &mut AppConfig, value: Option<String>) {
    if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        config.service.base_url = url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override() {
        let mut cfg = AppConfig::default();
        apply_base_url_override(&mut cfg, Some(" http://10.0.0.5:8080 ".into()));
        assert_eq!(cfg.service.base_url, "http://10.0.0.5:8080");
    }

    #[test]
    fn test_blank_env_ignored() {
        let mut cfg = AppConfig::default();
        apply_base_url_override(&mut cfg, Some("   ".into()));
        assert_eq!(cfg.service.base_url, "http://127.0.0.1:5000");
        apply_base_url_override(&mut cfg, None);
        assert_eq!(cfg.service.base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_invalid_timestamp_format_reset() {
        let mut cfg = AppConfig::default();
        assert_eq!(reset_invalid_timestamp_format(&mut cfg), None);
        cfg.ui.timestamp_format = "%Q".into();
        assert_eq!(
            reset_invalid_timestamp_format(&mut cfg).as_deref(),
            Some("%Q")
        );
        assert_eq!(cfg.ui.timestamp_format, "%H:%M:%S");
    }
}
