//! Typed access to the five persisted records.

use chrono::{DateTime, TimeZone};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use fixitup_core::{CommunityPost, LeaderboardEntry, MaintenanceTask, Project, UserProfile};
use fixitup_schedule::default_tasks;

use crate::backend::KeyValueStore;
use crate::error::{Result, StorageError};
use crate::migrate::{migrate_profile, migrate_projects};

pub const KEY_PROFILE: &str = "user-profile";
pub const KEY_PROJECTS: &str = "user-projects";
pub const KEY_MAINTENANCE_TASKS: &str = "maintenance-tasks";
pub const KEY_COMMUNITY_POSTS: &str = "community-posts";
pub const KEY_LEADERBOARD: &str = "leaderboard";

/// Reads and writes domain records through a [`KeyValueStore`].
///
/// Records are plain JSON; migrations for legacy shapes run on load and the
/// migrated form is written back.
pub struct Gateway<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Gateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key).await? {
            None => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| StorageError::Json {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|source| StorageError::Json {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, value).await
    }

    // ── Profile ─────────────────────────────────────────────────

    pub async fn profile(&self) -> Result<Option<UserProfile>> {
        let Some(mut profile) = self.get_json::<UserProfile>(KEY_PROFILE).await? else {
            return Ok(None);
        };
        if migrate_profile(&mut profile) {
            info!(username = %profile.username, level = profile.level, "migrated profile level");
            self.save_profile(&profile).await?;
        }
        Ok(Some(profile))
    }

    /// Load the profile, creating and saving a fresh one if none exists.
    pub async fn profile_or_create(&self, username: impl FnOnce() -> String) -> Result<UserProfile> {
        if let Some(profile) = self.profile().await? {
            return Ok(profile);
        }
        let profile = UserProfile::new(username());
        info!(username = %profile.username, "created new profile");
        self.save_profile(&profile).await?;
        Ok(profile)
    }

    pub async fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.set_json(KEY_PROFILE, profile).await
    }

    // ── Projects ────────────────────────────────────────────────

    /// Project history, newest first. Missing statuses are filled in.
    pub async fn projects(&self) -> Result<Vec<Project>> {
        let mut projects: Vec<Project> = self.get_json(KEY_PROJECTS).await?.unwrap_or_default();
        let migrated = migrate_projects(&mut projects);
        if migrated > 0 {
            info!(count = migrated, "migrated legacy projects to explicit status");
            self.save_projects(&projects).await?;
        }
        Ok(projects)
    }

    pub async fn save_projects(&self, projects: &[Project]) -> Result<()> {
        self.set_json(KEY_PROJECTS, projects).await
    }

    // ── Maintenance tasks ───────────────────────────────────────

    /// Maintenance tasks; an empty or missing list is seeded with the
    /// default tasks (computed as of `now`) and saved.
    pub async fn maintenance_tasks<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
    ) -> Result<Vec<MaintenanceTask>> {
        let tasks: Vec<MaintenanceTask> = self
            .get_json(KEY_MAINTENANCE_TASKS)
            .await?
            .unwrap_or_default();
        if !tasks.is_empty() {
            return Ok(tasks);
        }
        let seeded = default_tasks(now);
        warn!(count = seeded.len(), "no maintenance tasks stored; seeding defaults");
        self.save_maintenance_tasks(&seeded).await?;
        Ok(seeded)
    }

    pub async fn save_maintenance_tasks(&self, tasks: &[MaintenanceTask]) -> Result<()> {
        self.set_json(KEY_MAINTENANCE_TASKS, tasks).await
    }

    // ── Community & leaderboard ─────────────────────────────────

    pub async fn community_posts(&self) -> Result<Vec<CommunityPost>> {
        Ok(self.get_json(KEY_COMMUNITY_POSTS).await?.unwrap_or_default())
    }

    pub async fn save_community_posts(&self, posts: &[CommunityPost]) -> Result<()> {
        self.set_json(KEY_COMMUNITY_POSTS, posts).await
    }

    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        Ok(self.get_json(KEY_LEADERBOARD).await?.unwrap_or_default())
    }

    pub async fn save_leaderboard(&self, entries: &[LeaderboardEntry]) -> Result<()> {
        self.set_json(KEY_LEADERBOARD, entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FileStore, MemoryStore};
    use chrono::Utc;
    use serde_json::json;

    fn gateway() -> Gateway<MemoryStore> {
        Gateway::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn missing_records_load_empty() {
        let gw = gateway();
        assert!(gw.profile().await.unwrap().is_none());
        assert!(gw.projects().await.unwrap().is_empty());
        assert!(gw.community_posts().await.unwrap().is_empty());
        assert!(gw.leaderboard().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn profile_is_created_once() {
        let gw = gateway();
        let created = gw.profile_or_create(|| "DIYer42".into()).await.unwrap();
        assert_eq!(created.username, "DIYer42");
        let again = gw.profile_or_create(|| "someone-else".into()).await.unwrap();
        assert_eq!(again.username, "DIYer42");
    }

    #[tokio::test]
    async fn legacy_projects_get_status_and_are_written_back() {
        let gw = gateway();
        gw.store()
            .set(
                KEY_PROJECTS,
                json!([
                    {"id": 1, "title": "Deck", "difficulty": "Hard", "points": 100,
                     "failures": ["Forgot tool"]},
                    {"id": 2, "title": "Tile", "difficulty": "Easy", "points": 25,
                     "status": "In Progress"}
                ]),
            )
            .await
            .unwrap();

        let projects = gw.projects().await.unwrap();
        assert_eq!(projects[0].status.as_deref(), Some("Completed"));
        assert_eq!(projects[0].failures[0].penalty, -5);
        assert_eq!(projects[1].status.as_deref(), Some("In Progress"));

        let raw = gw.store().get(KEY_PROJECTS).await.unwrap().unwrap();
        assert_eq!(raw[0]["status"], "Completed");
    }

    #[tokio::test]
    async fn stale_profile_level_is_repaired() {
        let gw = gateway();
        gw.store()
            .set(KEY_PROFILE, json!({"username": "u", "points": 250, "level": 1}))
            .await
            .unwrap();
        let profile = gw.profile().await.unwrap().unwrap();
        assert_eq!(profile.level, 3);
        assert!(profile.badges.is_empty());
    }

    #[tokio::test]
    async fn empty_task_list_is_seeded() {
        let gw = gateway();
        let now = Utc::now();
        let tasks = gw.maintenance_tasks(&now).await.unwrap();
        assert_eq!(tasks.len(), 3);
        let stored = gw.store().get(KEY_MAINTENANCE_TASKS).await.unwrap().unwrap();
        assert_eq!(stored.as_array().map(Vec::len), Some(3));

        let mut trimmed = tasks.clone();
        trimmed.truncate(1);
        gw.save_maintenance_tasks(&trimmed).await.unwrap();
        assert_eq!(gw.maintenance_tasks(&now).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn malformed_record_is_reported_with_key() {
        let gw = gateway();
        gw.store().set(KEY_LEADERBOARD, json!({"not": "a list"})).await.unwrap();
        match gw.leaderboard().await {
            Err(StorageError::Json { key, .. }) => assert_eq!(key, KEY_LEADERBOARD),
            other => panic!("expected json error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn file_backed_gateway_round_trips_profile() {
        let dir = tempfile::tempdir().unwrap();
        let gw = Gateway::new(FileStore::open(dir.path()).await.unwrap());
        let mut profile = UserProfile::new("Builder");
        profile.add_points(150);
        profile.badges.insert("Novice Fixer".into());
        gw.save_profile(&profile).await.unwrap();

        let reopened = Gateway::new(FileStore::open(dir.path()).await.unwrap());
        assert_eq!(reopened.profile().await.unwrap(), Some(profile));
    }
}
