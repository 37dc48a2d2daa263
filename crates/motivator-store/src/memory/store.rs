//! In-memory preference store using the dashmap crate.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use motivator_core::error::AppError;
use motivator_core::result::AppResult;
use motivator_core::traits::store::PreferenceStore;
use motivator_core::types::id::UserId;

/// In-memory preference store.
///
/// Clones share the same map. The store can be marked unavailable to
/// exercise callers' handling of an unreachable backend.
#[derive(Debug, Clone)]
pub struct MemoryPreferenceStore {
    /// Documents keyed by user.
    documents: Arc<DashMap<UserId, String>>,
    /// When `false`, every operation fails with `StoreUnavailable`.
    available: Arc<AtomicBool>,
}

impl MemoryPreferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            documents: Arc::new(DashMap::new()),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Mark the store reachable or unreachable.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no document is stored.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn ensure_available(&self) -> AppResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::store_unavailable("In-memory store is marked unavailable"))
        }
    }
}

impl Default for MemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn get(&self, user_id: &UserId) -> AppResult<Option<String>> {
        self.ensure_available()?;
        Ok(self.documents.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn put(&self, user_id: &UserId, document: &str) -> AppResult<()> {
        self.ensure_available()?;
        self.documents.insert(user_id.clone(), document.to_string());
        debug!(%user_id, "Stored preference document in memory");
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AppResult<bool> {
        self.ensure_available()?;
        Ok(self.documents.remove(user_id).is_some())
    }

    async fn list_users(&self) -> AppResult<Vec<UserId>> {
        self.ensure_available()?;
        let mut users: Vec<UserId> = self
            .documents
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        users.sort();
        Ok(users)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.available.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motivator_core::error::ErrorKind;

    fn user(id: &str) -> UserId {
        UserId::new(id).expect("id")
    }

    #[tokio::test]
    async fn test_put_get() {
        let store = MemoryPreferenceStore::new();
        store.put(&user("a"), "{}").await.unwrap();
        assert_eq!(store.get(&user("a")).await.unwrap(), Some("{}".to_string()));
        assert_eq!(store.get(&user("b")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = MemoryPreferenceStore::new();
        store.put(&user("a"), "1").await.unwrap();
        store.put(&user("a"), "2").await.unwrap();
        assert_eq!(store.get(&user("a")).await.unwrap(), Some("2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let store = MemoryPreferenceStore::new();
        store.put(&user("b"), "{}").await.unwrap();
        store.put(&user("a"), "{}").await.unwrap();
        assert_eq!(store.list_users().await.unwrap(), vec![user("a"), user("b")]);
        assert!(store.delete(&user("a")).await.unwrap());
        assert!(!store.delete(&user("a")).await.unwrap());
        assert_eq!(store.list_users().await.unwrap(), vec![user("b")]);
    }

    #[tokio::test]
    async fn test_unavailable() {
        let store = MemoryPreferenceStore::new();
        store.put(&user("a"), "{}").await.unwrap();
        store.set_available(false);

        let err = store.get(&user("a")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StoreUnavailable);
        assert!(!store.health_check().await.unwrap());

        store.set_available(true);
        assert!(store.get(&user("a")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_json_roundtrip() {
        let store = MemoryPreferenceStore::new();
        let data = serde_json::json!({"enabled": true, "days": ["monday"]});
        store.put_json(&user("a"), &data).await.unwrap();
        let result: Option<serde_json::Value> = store.get_json(&user("a")).await.unwrap();
        assert_eq!(result, Some(data));
    }
}
