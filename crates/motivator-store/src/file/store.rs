//! Preference store backed by a single JSON file.
//!
//! The file holds one object mapping user IDs to preference documents.
//! Writes go to a sibling temporary file that is then renamed into place,
//! so a crash never leaves a half-written store behind.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use motivator_core::config::store::FileStoreConfig;
use motivator_core::error::{AppError, ErrorKind};
use motivator_core::result::AppResult;
use motivator_core::traits::store::PreferenceStore;
use motivator_core::types::id::UserId;

type Documents = BTreeMap<String, serde_json::Value>;

/// JSON-file preference store.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    /// Path of the backing file.
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Arc<Mutex<()>>,
}

impl FilePreferenceStore {
    /// Create a store for the configured path. The file is created lazily.
    pub fn new(config: &FileStoreConfig) -> Self {
        Self::at(&config.path)
    }

    /// Create a store for an explicit path.
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> AppResult<Documents> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(Documents::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Serialization,
                    format!("Corrupt preference file '{}'", self.path.display()),
                    e,
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Documents::new()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::StoreUnavailable,
                format!("Failed to read '{}'", self.path.display()),
                e,
            )),
        }
    }

    async fn write_all(&self, documents: &Documents) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(documents)?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    fn provider_type(&self) -> &str {
        "file"
    }

    async fn get(&self, user_id: &UserId) -> AppResult<Option<String>> {
        let _guard = self.lock.lock().await;
        let documents = self.read_all().await?;
        documents
            .get(user_id.as_str())
            .map(serde_json::to_string)
            .transpose()
            .map_err(AppError::from)
    }

    async fn put(&self, user_id: &UserId, document: &str) -> AppResult<()> {
        let value: serde_json::Value = serde_json::from_str(document)?;

        let _guard = self.lock.lock().await;
        let mut documents = self.read_all().await?;
        documents.insert(user_id.to_string(), value);
        self.write_all(&documents).await?;

        debug!(%user_id, path = %self.path.display(), "Stored preference document");
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AppResult<bool> {
        let _guard = self.lock.lock().await;
        let mut documents = self.read_all().await?;
        let existed = documents.remove(user_id.as_str()).is_some();
        if existed {
            self.write_all(&documents).await?;
        }
        Ok(existed)
    }

    async fn list_users(&self) -> AppResult<Vec<UserId>> {
        let _guard = self.lock.lock().await;
        let documents = self.read_all().await?;

        let mut users = Vec::with_capacity(documents.len());
        for key in documents.keys() {
            match UserId::new(key.as_str()) {
                Ok(user) => users.push(user),
                Err(e) => warn!(key = %key, error = %e, "Skipping invalid user key"),
            }
        }
        Ok(users)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await.is_ok())
    }
}
