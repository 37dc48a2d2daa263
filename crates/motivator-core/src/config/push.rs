//! Push registrar configuration.

use serde::{Deserialize, Serialize};

/// Top-level push registration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    /// Registrar backend: `"local"` or `"http"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Local registrar configuration.
    #[serde(default)]
    pub local: LocalRegistrarConfig,
    /// HTTP registrar configuration.
    #[serde(default)]
    pub http: HttpRegistrarConfig,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            local: LocalRegistrarConfig::default(),
            http: HttpRegistrarConfig::default(),
        }
    }
}

/// Local registrar configuration.
///
/// The local registrar issues tokens in-process; it stands in for the
/// platform push service on development hosts and in tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalRegistrarConfig {
    /// Whether notification permission is granted on this host.
    #[serde(default = "default_true")]
    pub grant: bool,
    /// Prefix of the tokens handed out by the registrar.
    #[serde(default = "default_token_prefix")]
    pub token_prefix: String,
}

impl Default for LocalRegistrarConfig {
    fn default() -> Self {
        Self {
            grant: true,
            token_prefix: default_token_prefix(),
        }
    }
}

/// HTTP registrar configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpRegistrarConfig {
    /// Registration endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Bearer token sent with registration requests.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Transport-level request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for HttpRegistrarConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_true() -> bool {
    true
}

fn default_token_prefix() -> String {
    "PushToken".to_string()
}

fn default_endpoint() -> String {
    "http://localhost:8080/push/registrations".to_string()
}

fn default_request_timeout() -> u64 {
    30
}
