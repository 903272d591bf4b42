use std::path::PathBuf;
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::core::api::DEFAULT_BASE_URL;

/// Prefix for environment overrides, e.g. `LAUNCHDECK_API__BASE_URL`.
pub const ENV_PREFIX: &str = "LAUNCHDECK_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Figment(#[from] Box<figment::Error>),
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub tui: TuiConfig,
    pub display: DisplayConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Whole-request timeout. Unset means transport defaults.
    pub timeout_secs: Option<u64>,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Characters of a description shown in list rows.
    pub description_max_len: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 50 }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            description_max_len: 60,
        }
    }
}

impl AppConfig {
    /// Defaults, then `config.toml`, then `LAUNCHDECK_*` variables.
    pub fn figment_for(path: PathBuf) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn try_load_from(path: PathBuf) -> Result<Self, ConfigError> {
        Self::figment_for(path)
            .extract()
            .map_err(|e| ConfigError::Figment(Box::new(e)))
    }

    /// Load configuration from `~/.config/launchdeck/config.toml`.
    /// Returns `Default` if it cannot be read.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match Self::try_load_from(config_path.clone()) {
            Ok(config) => {
                log::info!("Loaded config (file: {})", config_path.display());
                config
            }
            Err(e) => {
                log::warn!(
                    "Failed to load config at {}: {e}; using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("launchdeck").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert!(config.api.timeout().is_none());
        assert_eq!(config.tui.tick_rate_ms, 50);
        assert_eq!(config.display.description_max_len, 60);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        Jail::expect_with(|jail| {
            let path = jail.directory().join("absent.toml");
            let config: AppConfig = AppConfig::figment_for(path).extract()?;
            assert_eq!(config, AppConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [api]
                base_url = "http://localhost:4000"
                timeout_secs = 15

                [display]
                description_max_len = 40
                "#,
            )?;
            let config: AppConfig =
                AppConfig::figment_for(jail.directory().join("config.toml")).extract()?;
            assert_eq!(config.api.base_url, "http://localhost:4000");
            assert_eq!(config.api.timeout(), Some(Duration::from_secs(15)));
            assert_eq!(config.display.description_max_len, 40);
            assert_eq!(config.tui.tick_rate_ms, 50);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[tui]\ntick_rate_ms = 100\n")?;
            jail.set_env("LAUNCHDECK_TUI__TICK_RATE_MS", "250");
            jail.set_env("LAUNCHDECK_API__BASE_URL", "http://127.0.0.1:9000");
            let config: AppConfig =
                AppConfig::figment_for(jail.directory().join("config.toml")).extract()?;
            assert_eq!(config.tui.tick_rate_ms, 250);
            assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_file_is_error() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[tui]\ntick_rate_ms = \"fast\"\n")?;
            let result = AppConfig::try_load_from(jail.directory().join("config.toml"));
            assert!(matches!(result, Err(ConfigError::Figment(_))));
            Ok(())
        });
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }
}
