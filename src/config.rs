use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "admin_config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the chatbot backend, without the /admin/stats suffix.
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Trailing window shown on startup. Must be 7, 30, or 90.
    pub default_days: u32,
    /// Re-fetch the current window every this many seconds. 0 disables.
    pub refresh_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            timeout_secs: 10,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_days: 7,
            refresh_secs: 0,
        }
    }
}

impl AppConfig {
    /// Load from an explicit path, else the cwd config file; a missing cwd
    /// file is seeded with the defaults so it can be edited afterwards.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            let content = fs::read_to_string(path)
                .with_context(|| format!("cannot read config {}", path.display()))?;
            return toml::from_str(&content)
                .with_context(|| format!("invalid config {}", path.display()));
        }

        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: AppConfig = toml::from_str(&content).context("invalid admin_config.toml")?;
            Ok(config)
        } else {
            let config = Self::default();
            let content = toml::to_string_pretty(&config)?;
            fs::write(path, content)?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_backend() {
        let config = AppConfig::default();
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.dashboard.default_days, 7);
        assert_eq!(config.dashboard.refresh_secs, 0);
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.server.base_url, config.server.base_url);
        assert_eq!(parsed.server.timeout_secs, config.server.timeout_secs);
    }

    #[test]
    fn test_partial_section_fails_loudly() {
        let err = toml::from_str::<AppConfig>("[server]\nbase_url = \"http://x\"\n");
        assert!(err.is_err());
    }
}
