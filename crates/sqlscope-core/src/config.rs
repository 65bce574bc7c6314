use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the sqlscope client.
///
/// Loaded from `~/.sqlscope/config.toml` by default. The backend base URL is
/// explicit configuration handed to the gateway at construction; nothing in
/// the codebase mutates it afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SqlscopeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

impl SqlscopeConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SqlscopeConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file is missing
    /// or unparseable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Query backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the translation/execution backend.
    pub base_url: String,
    /// Use the canned demo backend instead of HTTP.
    pub demo_mode: bool,
    /// Simulated latency of the demo backend, in milliseconds.
    pub demo_delay_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            demo_mode: false,
            demo_delay_ms: 500,
        }
    }
}

/// Chart dataset presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Legend label applied to the bound dataset.
    pub dataset_label: String,
    /// CSS color for dataset strokes.
    pub border_color: String,
    /// CSS color for dataset fills.
    pub background_color: String,
    /// Line tension for line-family charts.
    pub tension: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            dataset_label: "User Data".to_string(),
            border_color: "rgb(75, 192, 192)".to_string(),
            background_color: "rgba(75, 192, 192, 0.2)".to_string(),
            tension: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SqlscopeConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
        assert!(!config.backend.demo_mode);
        assert_eq!(config.backend.demo_delay_ms, 500);
        assert_eq!(config.chart.dataset_label, "User Data");
        assert_eq!(config.chart.border_color, "rgb(75, 192, 192)");
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = SqlscopeConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = SqlscopeConfig::default();
        config.backend.base_url = "http://10.0.0.2:8080".to_string();
        config.backend.demo_mode = true;
        config.general.log_level = "debug".to_string();
        config.save(&path).unwrap();

        let loaded = SqlscopeConfig::load(&path).unwrap();
        assert_eq!(loaded.backend.base_url, "http://10.0.0.2:8080");
        assert!(loaded.backend.demo_mode);
        assert_eq!(loaded.general.log_level, "debug");
    }

    #[test]
    fn test_partial_toml_applies_defaults() {
        let config: SqlscopeConfig = toml::from_str(
            r#"
            [backend]
            base_url = "http://example.test:5000"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "http://example.test:5000");
        // Untouched sections and fields keep defaults.
        assert_eq!(config.backend.demo_delay_ms, 500);
        assert_eq!(config.general.log_level, "info");
        assert!((config.chart.tension - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: SqlscopeConfig = toml::from_str("").unwrap();
        assert_eq!(config.chart.background_color, "rgba(75, 192, 192, 0.2)");
    }

    #[test]
    fn test_load_invalid_toml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "backend = [[[").unwrap();
        assert!(SqlscopeConfig::load(&path).is_err());
    }
}
