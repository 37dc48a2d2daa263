//! Redis preference store implementation.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, warn};

use motivator_core::error::{AppError, ErrorKind};
use motivator_core::result::AppResult;
use motivator_core::traits::store::PreferenceStore;
use motivator_core::types::id::UserId;

use super::client::RedisClient;
use crate::keys;

/// Hint for how many keys each SCAN step examines.
const SCAN_BATCH: usize = 200;

/// Redis-backed preference store.
///
/// Documents are plain string values without expiry.
#[derive(Debug, Clone)]
pub struct RedisPreferenceStore {
    /// Redis client.
    client: RedisClient,
}

impl RedisPreferenceStore {
    /// Create a new Redis preference store.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::StoreUnavailable, format!("Redis error: {e}"), e)
    }
}

#[async_trait]
impl PreferenceStore for RedisPreferenceStore {
    fn provider_type(&self) -> &str {
        "redis"
    }

    async fn get(&self, user_id: &UserId) -> AppResult<Option<String>> {
        let key = self.client.prefixed_key(&keys::preference(user_id));
        let mut conn = self.client.conn_mut();
        let result: Option<String> = conn.get(&key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn put(&self, user_id: &UserId, document: &str) -> AppResult<()> {
        let key = self.client.prefixed_key(&keys::preference(user_id));
        let mut conn = self.client.conn_mut();
        let _: () = conn.set(&key, document).await.map_err(Self::map_err)?;
        debug!(%user_id, "Stored preference document in Redis");
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AppResult<bool> {
        let key = self.client.prefixed_key(&keys::preference(user_id));
        let mut conn = self.client.conn_mut();
        let removed: u64 = conn.del(&key).await.map_err(Self::map_err)?;
        Ok(removed > 0)
    }

    async fn list_users(&self) -> AppResult<Vec<UserId>> {
        let pattern = self.client.prefixed_key(&keys::preference_pattern());
        let mut conn = self.client.conn_mut();

        let mut found = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(Self::map_err)?;

            found.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(users_from_keys(self.client.key_prefix(), &found))
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}

/// Turn scanned keys into a sorted, duplicate-free user list.
///
/// SCAN may return a key more than once; keys that do not parse are
/// logged and skipped.
fn users_from_keys(prefix: &str, found: &[String]) -> Vec<UserId> {
    let mut users = Vec::with_capacity(found.len());
    for key in found {
        match keys::user_from_preference_key(prefix, key) {
            Ok(user) => users.push(user),
            Err(e) => warn!(key = %key, error = %e, "Skipping unexpected Redis key"),
        }
    }
    users.sort();
    users.dedup();
    users
}
