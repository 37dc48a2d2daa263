//! Notification preference manager configuration.

use serde::{Deserialize, Serialize};

/// Settings consumed by the notification preference manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Upper bound on a single push registration attempt, in milliseconds.
    #[serde(default = "default_registration_timeout")]
    pub registration_timeout_ms: u64,
    /// IANA timezone used when a session does not carry one.
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            registration_timeout_ms: default_registration_timeout(),
            default_timezone: default_timezone(),
        }
    }
}

impl NotificationConfig {
    /// Parse the configured default timezone.
    pub fn timezone(&self) -> Result<chrono_tz::Tz, crate::error::AppError> {
        self.default_timezone.parse::<chrono_tz::Tz>().map_err(|e| {
            crate::error::AppError::configuration(format!(
                "Invalid default timezone '{}': {e}",
                self.default_timezone
            ))
        })
    }
}

fn default_registration_timeout() -> u64 {
    10_000
}

fn default_timezone() -> String {
    "UTC".to_string()
}
