//! Preference store configuration.

use serde::{Deserialize, Serialize};

/// Top-level preference store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store backend: `"memory"`, `"file"`, or `"redis"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// JSON-file backend configuration.
    #[serde(default)]
    pub file: FileStoreConfig,
    /// Redis backend configuration.
    #[serde(default)]
    pub redis: RedisStoreConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            file: FileStoreConfig::default(),
            redis: RedisStoreConfig::default(),
        }
    }
}

/// JSON-file backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStoreConfig {
    /// Path of the JSON document holding every user's preference.
    #[serde(default = "default_file_path")]
    pub path: String,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            path: default_file_path(),
        }
    }
}

/// Redis backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisStoreConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Key prefix for all Motivator keys.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_provider() -> String {
    "file".to_string()
}

fn default_file_path() -> String {
    "data/preferences.json".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_key_prefix() -> String {
    "motivator:".to_string()
}
