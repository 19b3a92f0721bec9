use serde::Deserialize;

use crate::domain::pollutant::Thresholds;

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub backend: BackendSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

pub fn load_backend_config() -> anyhow::Result<BackendConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/backend"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Threshold table for the status classifier. The file is optional; an
/// absent or partial file falls back to the built-in defaults.
pub fn load_thresholds() -> anyhow::Result<Thresholds> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/thresholds").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_settings_defaults() {
        let settings: BackendSettings =
            serde_json::from_str(r#"{"base_url": "http://127.0.0.1:8000"}"#).unwrap();
        assert_eq!(settings.base_url, "http://127.0.0.1:8000");
        assert_eq!(settings.timeout_secs, 10);
        assert_eq!(settings.poll_interval_secs, 30);
        assert_eq!(settings.listen_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_thresholds_partial_config() {
        let thresholds: Thresholds =
            serde_json::from_str(r#"{"nox": {"warning_low": 6.0, "exceeded_high": 50.0}}"#)
                .unwrap();
        assert_eq!(thresholds.nox.warning_low, Some(6.0));
        // Untouched kinds keep the defaults.
        assert_eq!(thresholds.so2.exceeded_high, 30.0);
    }
}
