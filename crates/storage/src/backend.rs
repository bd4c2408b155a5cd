//! Key-value backends for JSON records.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{Result, StorageError};

/// Async get/set over named JSON records.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a record; `None` when the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Write (replace) a record.
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// Keys are used as filenames, so restrict them to `[a-z0-9_-]`.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

// ── In-memory ────────────────────────────────────────────────

/// Volatile store, used by tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        validate_key(key)?;
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        validate_key(key)?;
        self.records.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

// ── Filesystem ───────────────────────────────────────────────

/// One pretty-printed `<key>.json` file per record:
///
/// ```text
/// data/
///   user-profile.json
///   user-projects.json
///   maintenance-tasks.json
///   community-posts.json
///   leaderboard.json
/// ```
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `base_dir`, creating the directory if needed.
    pub async fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        tokio::fs::create_dir_all(&base_dir).await?;
        info!("Storage: file store at {}", base_dir.display());
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        validate_key(key)?;
        let path = self.record_path(key);
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_str(&json).map_err(|source| StorageError::Json {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        validate_key(key)?;
        let json = serde_json::to_string_pretty(&value).map_err(|source| StorageError::Json {
            key: key.to_string(),
            source,
        })?;
        // Write beside the target and rename so readers never see a partial file.
        let path = self.record_path(key);
        let tmp = self.base_dir.join(format!(".{key}.json.tmp"));
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!(key, path = %path.display(), "saved record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn memory_store_get_set() {
        let store = MemoryStore::new();
        assert_eq!(store.get("leaderboard").await.unwrap(), None);
        store.set("leaderboard", json!([1, 2])).await.unwrap();
        assert_eq!(store.get("leaderboard").await.unwrap(), Some(json!([1, 2])));
    }

    #[tokio::test]
    async fn file_store_persists_across_instances() {
        let dir = TempDir::new().expect("create tempdir");
        let store = FileStore::open(dir.path()).await.unwrap();
        store.set("user-profile", json!({"username": "a"})).await.unwrap();

        let reopened = FileStore::open(dir.path()).await.unwrap();
        assert_eq!(
            reopened.get("user-profile").await.unwrap(),
            Some(json!({"username": "a"}))
        );
        assert!(dir.path().join("user-profile.json").exists());
        assert!(!dir.path().join(".user-profile.json.tmp").exists());
    }

    #[tokio::test]
    async fn file_store_missing_key_is_none() {
        let dir = TempDir::new().expect("create tempdir");
        let store = FileStore::open(dir.path().join("nested")).await.unwrap();
        assert_eq!(store.get("community-posts").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_reports_corrupt_json() {
        let dir = TempDir::new().expect("create tempdir");
        std::fs::write(dir.path().join("leaderboard.json"), "{not json").unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        let err = store.get("leaderboard").await.unwrap_err();
        assert!(matches!(err, StorageError::Json { ref key, .. } if key == "leaderboard"));
    }

    #[tokio::test]
    async fn keys_are_validated() {
        let store = MemoryStore::new();
        for bad in ["", "../etc/passwd", "User Profile"] {
            assert!(matches!(
                store.get(bad).await,
                Err(StorageError::InvalidKey(_))
            ));
        }
    }
}
