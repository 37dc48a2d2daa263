//! Registrar manager that dispatches to the configured backend.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use motivator_core::config::push::PushConfig;
use motivator_core::error::AppError;
use motivator_core::result::AppResult;
use motivator_core::traits::registrar::{PushRegistrar, RegistrationOutcome};
use motivator_core::types::device::DeviceInfo;
use motivator_core::types::id::UserId;

/// Registrar manager that wraps the configured push registrar.
#[derive(Debug, Clone)]
pub struct RegistrarManager {
    /// The inner registrar.
    inner: Arc<dyn PushRegistrar>,
}

impl RegistrarManager {
    /// Create a new registrar manager from configuration.
    pub fn new(config: &PushConfig) -> AppResult<Self> {
        let inner: Arc<dyn PushRegistrar> = match config.provider.as_str() {
            #[cfg(feature = "http")]
            "http" => {
                info!(endpoint = %config.http.endpoint, "Initializing HTTP push registrar");
                Arc::new(crate::http::HttpPushRegistrar::new(&config.http)?)
            }
            #[cfg(feature = "local")]
            "local" => {
                info!(grant = config.local.grant, "Initializing local push registrar");
                Arc::new(crate::local::LocalPushRegistrar::new(&config.local))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown push provider: '{other}'. Supported: local, http"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a registrar manager from an existing registrar (for testing).
    pub fn from_provider(provider: Arc<dyn PushRegistrar>) -> Self {
        Self { inner: provider }
    }
}

#[async_trait]
impl PushRegistrar for RegistrarManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn register_device(
        &self,
        user_id: &UserId,
        device: &DeviceInfo,
    ) -> AppResult<RegistrationOutcome> {
        self.inner.register_device(user_id, device).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motivator_core::error::ErrorKind;

    #[test]
    fn test_unknown_provider() {
        let config = PushConfig {
            provider: "carrier-pigeon".to_string(),
            ..PushConfig::default()
        };
        let err = RegistrarManager::new(&config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_default_is_local() {
        let manager = RegistrarManager::new(&PushConfig::default()).expect("local");
        assert_eq!(manager.provider_type(), "local");
    }
}
