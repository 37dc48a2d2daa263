//! Device description passed to push registrars.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::types::id::DeviceId;

/// Platform the client runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Apple iOS.
    Ios,
    /// Google Android.
    Android,
    /// Browser build.
    Web,
}

impl Platform {
    /// Return the platform as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Web => "web",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            "web" => Ok(Self::Web),
            _ => Err(AppError::unknown_enum(format!(
                "Invalid platform: '{s}'. Expected one of: ios, android, web"
            ))),
        }
    }
}

/// The device a session is running on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Platform-assigned device identifier.
    pub device_id: DeviceId,
    /// Client platform.
    pub platform: Platform,
    /// `false` for simulators and emulators, which cannot receive pushes.
    pub is_physical_device: bool,
}

impl DeviceInfo {
    /// Describe a physical device.
    pub fn physical(device_id: DeviceId, platform: Platform) -> Self {
        Self {
            device_id,
            platform,
            is_physical_device: true,
        }
    }
}
