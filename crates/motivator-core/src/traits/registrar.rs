//! Push registrar trait for obtaining device push registrations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::device::DeviceInfo;
use crate::types::id::UserId;

/// A push registration issued by the platform push service.
///
/// The token is opaque and bound to one (user, device) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushRegistration {
    /// Opaque token used to address the device.
    pub token: String,
    /// The user the registration belongs to.
    pub user_id: UserId,
    /// The device the registration belongs to.
    pub device: DeviceInfo,
    /// When the registration was first issued.
    pub issued_at: DateTime<Utc>,
}

/// Result of a registration attempt that reached the registrar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// A registration exists for the device.
    Granted(PushRegistration),
    /// The platform or the user refused delivery.
    Denied {
        /// Why the registration was refused.
        reason: String,
    },
}

impl RegistrationOutcome {
    /// Whether the outcome carries a registration.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }
}

/// Trait for push registration backends.
///
/// Implementations must be idempotent: registering an already-registered
/// device returns the existing registration.
#[async_trait]
pub trait PushRegistrar: Send + Sync + std::fmt::Debug + 'static {
    /// Return the registrar type name (e.g., "static", "http").
    fn provider_type(&self) -> &str;

    /// Obtain or confirm a registration for the given user's device.
    ///
    /// Transport failures are returned as errors; refusals are
    /// [`RegistrationOutcome::Denied`].
    async fn register_device(
        &self,
        user_id: &UserId,
        device: &DeviceInfo,
    ) -> AppResult<RegistrationOutcome>;
}
