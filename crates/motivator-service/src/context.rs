//! Session context carrying the signed-in user and the device they use.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use motivator_core::types::device::DeviceInfo;
use motivator_core::types::id::UserId;

/// Context for the current signed-in session.
///
/// Built once the authentication provider has confirmed the user and
/// passed into every service call, so that each operation knows *who* is
/// acting, on *which* device, and in *which* timezone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// The signed-in user's ID.
    pub user_id: UserId,
    /// Email address reported by the authentication provider.
    pub email: Option<String>,
    /// Display name chosen at registration.
    pub display_name: Option<String>,
    /// The device the session runs on.
    pub device: DeviceInfo,
    /// The device's IANA timezone.
    pub timezone: Tz,
    /// When the session was established.
    pub signed_in_at: DateTime<Utc>,
}

impl SessionContext {
    /// Creates a new session context.
    pub fn new(user_id: UserId, device: DeviceInfo, timezone: Tz) -> Self {
        Self {
            user_id,
            email: None,
            display_name: None,
            device,
            timezone,
            signed_in_at: Utc::now(),
        }
    }

    /// Attach the user's email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Attach the user's display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}
