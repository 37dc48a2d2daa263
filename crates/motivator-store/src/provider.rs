//! Store manager that dispatches to the configured backend.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use motivator_core::config::store::StoreConfig;
use motivator_core::error::AppError;
use motivator_core::result::AppResult;
use motivator_core::traits::store::PreferenceStore;
use motivator_core::types::id::UserId;

/// Store manager that wraps the configured preference store.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner store backend.
    inner: Arc<dyn PreferenceStore>,
}

impl StoreManager {
    /// Create a new store manager from configuration.
    pub async fn new(config: &StoreConfig) -> AppResult<Self> {
        let inner: Arc<dyn PreferenceStore> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis preference store");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisPreferenceStore::new(client))
            }
            #[cfg(feature = "file")]
            "file" => {
                info!(path = %config.file.path, "Initializing file preference store");
                Arc::new(crate::file::FilePreferenceStore::new(&config.file))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory preference store");
                Arc::new(crate::memory::MemoryPreferenceStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown store provider: '{other}'. Supported: memory, file, redis"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a store manager from an existing backend (for testing).
    pub fn from_provider(provider: Arc<dyn PreferenceStore>) -> Self {
        Self { inner: provider }
    }

    /// Get a reference to the inner backend.
    pub fn provider(&self) -> &dyn PreferenceStore {
        self.inner.as_ref()
    }
}

#[async_trait]
impl PreferenceStore for StoreManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn get(&self, user_id: &UserId) -> AppResult<Option<String>> {
        self.inner.get(user_id).await
    }

    async fn put(&self, user_id: &UserId, document: &str) -> AppResult<()> {
        self.inner.put(user_id, document).await
    }

    async fn delete(&self, user_id: &UserId) -> AppResult<bool> {
        self.inner.delete(user_id).await
    }

    async fn list_users(&self) -> AppResult<Vec<UserId>> {
        self.inner.list_users().await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
