//! Push registrar that delegates to a remote registration endpoint.
//!
//! Protocol: `POST {endpoint}` with a JSON body
//! `{"userId", "deviceId", "platform", "isPhysicalDevice"}`.
//!
//! - `200`/`201` with `{"token": "...", "issuedAt": "..."}` grants the
//!   registration (`issuedAt` is optional).
//! - `401`, `403`, and `410` are refusals; the response body, if any, is
//!   used as the reason.
//! - Any other status is an external-service failure.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use motivator_core::config::push::HttpRegistrarConfig;
use motivator_core::error::{AppError, ErrorKind};
use motivator_core::result::AppResult;
use motivator_core::traits::registrar::{PushRegistrar, PushRegistration, RegistrationOutcome};
use motivator_core::types::device::DeviceInfo;
use motivator_core::types::id::UserId;

/// Request body sent to the registration endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationRequest<'a> {
    user_id: &'a str,
    device_id: &'a str,
    platform: &'a str,
    is_physical_device: bool,
}

/// Successful response from the registration endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationResponse {
    token: String,
    #[serde(default)]
    issued_at: Option<DateTime<Utc>>,
}

/// HTTP-backed push registrar.
#[derive(Debug, Clone)]
pub struct HttpPushRegistrar {
    /// Shared HTTP client.
    client: reqwest::Client,
    /// Registration endpoint URL.
    endpoint: String,
    /// Optional bearer token.
    api_key: Option<String>,
}

impl HttpPushRegistrar {
    /// Create a registrar from configuration.
    pub fn new(config: &HttpRegistrarConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn map_transport_err(e: reqwest::Error) -> AppError {
        if e.is_timeout() {
            AppError::with_source(
                ErrorKind::RegistrationTimeout,
                "Push registration request timed out",
                e,
            )
        } else {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Push registration request failed: {e}"),
                e,
            )
        }
    }
}

#[async_trait]
impl PushRegistrar for HttpPushRegistrar {
    fn provider_type(&self) -> &str {
        "http"
    }

    async fn register_device(
        &self,
        user_id: &UserId,
        device: &DeviceInfo,
    ) -> AppResult<RegistrationOutcome> {
        let body = RegistrationRequest {
            user_id: user_id.as_str(),
            device_id: device.device_id.as_str(),
            platform: device.platform.as_str(),
            is_physical_device: device.is_physical_device,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(Self::map_transport_err)?;
        let status = response.status();
        debug!(%user_id, device_id = %device.device_id, %status, "Registration endpoint answered");

        match status {
            StatusCode::OK | StatusCode::CREATED => {
                let parsed: RegistrationResponse =
                    response.json().await.map_err(Self::map_transport_err)?;
                Ok(RegistrationOutcome::Granted(PushRegistration {
                    token: parsed.token,
                    user_id: user_id.clone(),
                    device: device.clone(),
                    issued_at: parsed.issued_at.unwrap_or_else(Utc::now),
                }))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::GONE => {
                let text = response.text().await.unwrap_or_default();
                let reason = if text.trim().is_empty() {
                    format!("Registration refused with status {status}")
                } else {
                    text.trim().to_string()
                };
                warn!(%user_id, device_id = %device.device_id, %reason, "Push registration refused");
                Ok(RegistrationOutcome::Denied { reason })
            }
            other => Err(AppError::external_service(format!(
                "Registration endpoint returned unexpected status {other}"
            ))),
        }
    }
}
