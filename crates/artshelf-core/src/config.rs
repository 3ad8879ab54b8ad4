use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use artshelf_api::RetryConfig;

/// Environment variable the CLI reads the catalog service URL from
pub const API_URL_ENV: &str = "ARTSHELF_API_URL";

/// Main configuration structure
///
/// Priority: CLI flag > Env > File > Defaults. The flag and the
/// environment variable are both resolved by the CLI argument parser.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save config to the default location
    pub fn save(&self) -> crate::Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> crate::Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Get the config file path
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("artshelf");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Catalog service root, e.g. `http://localhost:3000`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub retry: RetrySettings,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout() -> u64 {
    5
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            retry: RetrySettings::default(),
        }
    }
}

/// Backoff policy for read requests
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        let defaults = RetryConfig::default();
        Self {
            max_retries: defaults.max_retries,
            initial_delay_ms: defaults.initial_delay_ms,
            max_delay_ms: defaults.max_delay_ms,
            backoff_multiplier: defaults.backoff_multiplier,
        }
    }
}

impl RetrySettings {
    pub fn to_retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.max_retries,
            initial_delay_ms: self.initial_delay_ms,
            max_delay_ms: self.max_delay_ms,
            backoff_multiplier: self.backoff_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.retry.max_retries, 3);
    }

    #[test]
    fn test_config_serialization() {
        let toml = Config::default().to_toml_string().unwrap();
        assert!(toml.contains("base_url"));
        assert!(toml.contains("timeout_secs"));
        assert!(toml.contains("max_retries"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("artshelf-save-{}", std::process::id()));
        let path = dir.join("nested/config.toml");

        let mut config = Config::default();
        config.api.base_url = "https://catalog.example".to_string();
        config.api.retry.max_retries = 0;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path);
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(loaded.unwrap(), config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://catalog.example"

            [api.retry]
            max_retries = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://catalog.example");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.retry.max_retries, 1);
        assert_eq!(config.api.retry.initial_delay_ms, 500);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("artshelf-no-such-dir/config.toml");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let path = std::env::temp_dir().join(format!("artshelf-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let result = Config::load_from(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(crate::Error::ConfigError(_))));
    }

    #[test]
    fn test_retry_settings_convert() {
        let settings = RetrySettings {
            max_retries: 2,
            initial_delay_ms: 100,
            max_delay_ms: 400,
            backoff_multiplier: 3.0,
        };
        let retry = settings.to_retry_config();
        assert_eq!(retry.max_retries, 2);
        assert_eq!(retry.max_delay_ms, 400);
        assert_eq!(retry.backoff_multiplier, 3.0);
    }
}
