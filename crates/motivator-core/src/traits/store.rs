//! Preference store trait for pluggable persistence backends.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::UserId;

/// Key-value persistence for per-user preference documents.
///
/// Documents are stored as JSON strings keyed by user. A backend that
/// cannot be reached must fail with
/// [`ErrorKind::StoreUnavailable`](crate::error::ErrorKind::StoreUnavailable);
/// a missing document is `Ok(None)`, never an error.
#[async_trait]
pub trait PreferenceStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend type name (e.g., "memory", "redis").
    fn provider_type(&self) -> &str;

    /// Fetch the raw document for a user.
    async fn get(&self, user_id: &UserId) -> AppResult<Option<String>>;

    /// Replace the document for a user.
    async fn put(&self, user_id: &UserId, document: &str) -> AppResult<()>;

    /// Remove the document for a user. Returns `true` if one existed.
    async fn delete(&self, user_id: &UserId) -> AppResult<bool>;

    /// List every user that has a stored document.
    async fn list_users(&self) -> AppResult<Vec<UserId>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Fetch and deserialize a typed document.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        user_id: &UserId,
    ) -> AppResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(user_id).await? {
            Some(value) => {
                let parsed = serde_json::from_str(&value)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Serialize and store a typed document.
    async fn put_json<T: serde::Serialize + Send + Sync>(
        &self,
        user_id: &UserId,
        value: &T,
    ) -> AppResult<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value)?;
        self.put(user_id, &json).await
    }
}
