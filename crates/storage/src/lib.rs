//! Persistence gateway for FixItUp records.
//!
//! Records are stored as JSON under five well-known keys. The scheduling
//! engine and the ledger never touch storage; the application layer loads
//! snapshots here, hands them to the pure components, and saves the results.

pub mod backend;
pub mod error;
pub mod gateway;
pub mod migrate;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::{Result, StorageError};
pub use gateway::{
    Gateway, KEY_COMMUNITY_POSTS, KEY_LEADERBOARD, KEY_MAINTENANCE_TASKS, KEY_PROFILE,
    KEY_PROJECTS,
};

/// Open a file-backed gateway in the configured data directory.
pub async fn open_from_config(config: &fixitup_core::Config) -> Result<Gateway<FileStore>> {
    let store = FileStore::open(&config.storage.data_dir).await?;
    Ok(Gateway::new(store))
}
