//! Push registrar that issues tokens in-process.
//!
//! Mirrors the checks a device performs before asking the platform for a
//! token: notification permission must be granted, the device must be
//! physical, and the platform must support push delivery.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use motivator_core::config::push::LocalRegistrarConfig;
use motivator_core::result::AppResult;
use motivator_core::traits::registrar::{PushRegistrar, PushRegistration, RegistrationOutcome};
use motivator_core::types::device::{DeviceInfo, Platform};
use motivator_core::types::id::{DeviceId, UserId};

/// In-process push registrar.
///
/// Clones share the same registrations.
#[derive(Debug, Clone)]
pub struct LocalPushRegistrar {
    /// Issued registrations keyed by (user, device).
    registrations: Arc<DashMap<(UserId, DeviceId), PushRegistration>>,
    /// Whether notification permission is currently granted.
    grant: Arc<AtomicBool>,
    /// Prefix of issued tokens.
    token_prefix: String,
}

impl LocalPushRegistrar {
    /// Create a registrar from configuration.
    pub fn new(config: &LocalRegistrarConfig) -> Self {
        Self {
            registrations: Arc::new(DashMap::new()),
            grant: Arc::new(AtomicBool::new(config.grant)),
            token_prefix: config.token_prefix.clone(),
        }
    }

    /// Grant or revoke notification permission.
    pub fn set_grant(&self, grant: bool) {
        self.grant.store(grant, Ordering::SeqCst);
    }

    /// Number of distinct registrations issued so far.
    pub fn registration_count(&self) -> usize {
        self.registrations.len()
    }

    fn refusal(&self, device: &DeviceInfo) -> Option<&'static str> {
        if device.platform == Platform::Web {
            return Some("Push notifications are not supported on web");
        }
        if !device.is_physical_device {
            return Some("Must use a physical device for push notifications");
        }
        if !self.grant.load(Ordering::SeqCst) {
            return Some("Notification permission not granted");
        }
        None
    }
}

impl Default for LocalPushRegistrar {
    fn default() -> Self {
        Self::new(&LocalRegistrarConfig::default())
    }
}

#[async_trait]
impl PushRegistrar for LocalPushRegistrar {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn register_device(
        &self,
        user_id: &UserId,
        device: &DeviceInfo,
    ) -> AppResult<RegistrationOutcome> {
        if let Some(reason) = self.refusal(device) {
            debug!(%user_id, device_id = %device.device_id, reason, "Local registration refused");
            return Ok(RegistrationOutcome::Denied {
                reason: reason.to_string(),
            });
        }

        let key = (user_id.clone(), device.device_id.clone());
        let registration = self
            .registrations
            .entry(key)
            .or_insert_with(|| {
                let token = format!("{}[{}]", self.token_prefix, Uuid::new_v4().simple());
                info!(%user_id, device_id = %device.device_id, "Issued local push token");
                PushRegistration {
                    token,
                    user_id: user_id.clone(),
                    device: device.clone(),
                    issued_at: Utc::now(),
                }
            })
            .value()
            .clone();

        Ok(RegistrationOutcome::Granted(registration))
    }
}
