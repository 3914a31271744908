//! Application settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::backend::utils::paths::get_config_path;

/// Environment variable overriding [`ApiConfig::base_url`].
pub const API_URL_ENV: &str = "CELL_DASHBOARD_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Upper bound for a single API request.
    pub request_timeout_secs: u64,
    /// Number of jobs shown on the dashboard.
    pub recent_jobs_limit: usize,
    /// Number of jobs fetched for the job list page.
    pub job_list_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 15,
            recent_jobs_limit: 5,
            job_list_limit: 100,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Cell Dashboard".to_string(),
            width: 1280.0,
            height: 832.0,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

impl AppConfig {
    /// Loads settings from the application directory, writing defaults on
    /// first run, then applies environment overrides.
    pub fn load() -> Result<Self> {
        let path = get_config_path()?;
        let mut config = Self::load_or_create(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return Self::from_json(&content)
                .with_context(|| format!("Invalid settings in {}", path.display()));
        }

        let config = Self::default();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(&config)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote default settings to {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Applies overrides looked up by environment variable name.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            log::debug!("API base URL overridden by {API_URL_ENV}");
            self.api.base_url = url.trim().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let config = AppConfig::from_json(r#"{"api": {"base_url": "https://cells.example.org"}}"#)
            .unwrap();
        assert_eq!(config.api.base_url, "https://cells.example.org");
        assert_eq!(config.api.recent_jobs_limit, 5);
        assert_eq!(config.api.request_timeout_secs, 15);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn env_override_replaces_base_url() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| {
            (key == API_URL_ENV).then(|| " http://10.0.0.5:8000 ".to_string())
        });
        assert_eq!(config.api.base_url, "http://10.0.0.5:8000");
    }

    #[test]
    fn blank_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|_| Some("   ".to_string()));
        assert_eq!(config.api.base_url, ApiConfig::default().base_url);
    }

    #[test]
    fn zero_timeout_is_raised_to_one_second() {
        let api = ApiConfig {
            request_timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert_eq!(api.request_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn first_run_writes_defaults() {
        let dir = std::env::temp_dir().join(format!("cell-dashboard-config-{}", std::process::id()));
        let path = dir.join("config.json");
        let _ = std::fs::remove_dir_all(&dir);

        let config = AppConfig::load_or_create(&path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
