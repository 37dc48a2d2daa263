//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a default so that a missing file
//! yields a usable configuration.

pub mod logging;
pub mod notifications;
pub mod push;
pub mod store;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::notifications::NotificationConfig;
use self::push::PushConfig;
use self::store::StoreConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Preference store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Push registrar settings.
    #[serde(default)]
    pub push: PushConfig,
    /// Preference manager settings.
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// Merges the given file with an optional `config/{env}` overlay, where
    /// `env` comes from `MOTIVATOR_ENV`, and finally with environment
    /// variables prefixed with `MOTIVATOR__` (e.g. `MOTIVATOR__STORE__PROVIDER`).
    pub fn load(config_path: &str) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false));

        if let Ok(env) = std::env::var("MOTIVATOR_ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{env}")).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("MOTIVATOR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.store.provider, "file");
        assert_eq!(config.push.provider, "local");
        assert!(config.push.local.grant);
        assert_eq!(config.notifications.registration_timeout_ms, 10_000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load("does/not/exist").expect("defaults");
        assert_eq!(config.store.redis.key_prefix, "motivator:");
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
            [store]
            provider = "memory"

            [push]
            provider = "local"

            [push.local]
            grant = false

            [notifications]
            default_timezone = "Europe/Istanbul"
        "#;
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("parse");

        assert_eq!(config.store.provider, "memory");
        assert!(!config.push.local.grant);
        assert_eq!(config.store.file.path, "data/preferences.json");
        assert_eq!(
            config.notifications.timezone().expect("tz"),
            chrono_tz::Europe::Istanbul
        );
    }

    #[test]
    fn test_invalid_timezone() {
        let mut config = NotificationConfig::default();
        config.default_timezone = "Mars/Olympus".to_string();
        assert!(config.timezone().is_err());
    }
}
