//! Application layer: loads records through the gateway, runs the scheduling
//! engine and ledger over them, and saves the results.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use fixitup_core::{
    Clock, CommunityPost, LeaderboardEntry, MaintenanceTask, PostId, PostKind, Project,
    ProjectId, TaskId, UserProfile,
};
use fixitup_ledger::{
    evaluate_badges, generated_username, like_post, rank_of, record_project,
    record_task_completion, share_project, upsert_leaderboard, ProjectDraft, ProjectLogged,
};
use fixitup_schedule::{days_until, sort_by_due, DueStatus, RecurrencePolicy, TaskScheduler};
use fixitup_storage::{Gateway, KeyValueStore};

/// A task with its status as of now.
#[derive(Debug, Clone)]
pub struct TaskRow {
    pub task: MaintenanceTask,
    pub policy: Option<RecurrencePolicy>,
    pub status: DueStatus,
    pub days_until: i64,
}

/// Result of completing a maintenance task.
#[derive(Debug, Clone)]
pub struct TaskCompleted {
    pub task: MaintenanceTask,
    pub profile: UserProfile,
}

pub struct App<S: KeyValueStore, C: Clock> {
    gateway: Gateway<S>,
    scheduler: TaskScheduler<C>,
    due_soon_days: i64,
    username: Option<String>,
}

impl<S: KeyValueStore, C: Clock> App<S, C> {
    pub fn new(
        gateway: Gateway<S>,
        scheduler: TaskScheduler<C>,
        due_soon_days: i64,
        username: Option<String>,
    ) -> Self {
        Self {
            gateway,
            scheduler,
            due_soon_days,
            username,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.scheduler.now().with_timezone(&Utc)
    }

    // ── Profile ─────────────────────────────────────────────────

    /// Load the profile, creating it on first use. A profile with project
    /// history but no badges gets its badges recalculated and saved.
    pub async fn profile(&self) -> Result<UserProfile> {
        let seed = self.now().timestamp_millis();
        let profile = self
            .gateway
            .profile_or_create(|| {
                self.username
                    .clone()
                    .unwrap_or_else(|| generated_username(seed))
            })
            .await
            .context("failed to load profile")?;

        if !profile.badges.is_empty() {
            return Ok(profile);
        }
        let projects = self.gateway.projects().await?;
        if projects.is_empty() {
            return Ok(profile);
        }
        let evaluation = evaluate_badges(&projects, &profile);
        if evaluation.newly_awarded.is_empty() {
            return Ok(profile);
        }
        info!(
            username = %profile.username,
            badges = evaluation.newly_awarded.len(),
            "recalculated badges from project history"
        );
        let profile = evaluation.apply_to(&profile);
        self.gateway.save_profile(&profile).await?;
        Ok(profile)
    }

    pub async fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.gateway.projects().await?)
    }

    async fn publish_to_leaderboard(&self, profile: &UserProfile) -> Result<Vec<LeaderboardEntry>> {
        let board = upsert_leaderboard(&self.gateway.leaderboard().await?, profile);
        self.gateway.save_leaderboard(&board).await?;
        Ok(board)
    }

    // ── Maintenance tasks ───────────────────────────────────────

    /// All tasks, soonest due first.
    pub async fn tasks(&self) -> Result<Vec<TaskRow>> {
        let now = self.now();
        let mut tasks = self
            .gateway
            .maintenance_tasks(&self.scheduler.now())
            .await
            .context("failed to load maintenance tasks")?;
        sort_by_due(&mut tasks);
        Ok(tasks
            .into_iter()
            .map(|task| TaskRow {
                policy: RecurrencePolicy::from_fields(&task.recurrence),
                status: self.scheduler.status(&task, self.due_soon_days),
                days_until: days_until(task.next_due, now),
                task,
            })
            .collect())
    }

    pub async fn add_task(
        &self,
        title: &str,
        policy: RecurrencePolicy,
        points: i64,
        tags: Vec<String>,
    ) -> Result<MaintenanceTask> {
        let mut tasks = self.gateway.maintenance_tasks(&self.scheduler.now()).await?;
        let id = fresh_id(self.now(), tasks.iter().map(|t| t.id));
        let task = self.scheduler.create_task(id, title, policy, points, tags);
        tasks.push(task.clone());
        self.gateway.save_maintenance_tasks(&tasks).await?;
        info!(task_id = task.id, title = %task.title, next_due = %task.next_due, "added task");
        Ok(task)
    }

    /// Complete a task: reschedule it and credit its points.
    pub async fn complete_task(&self, id: TaskId) -> Result<TaskCompleted> {
        let mut tasks = self.gateway.maintenance_tasks(&self.scheduler.now()).await?;
        let Some(slot) = tasks.iter_mut().find(|t| t.id == id) else {
            bail!("no maintenance task with id {}", id);
        };
        let task = self.scheduler.complete_task(slot);
        *slot = task.clone();
        self.gateway.save_maintenance_tasks(&tasks).await?;

        let profile = record_task_completion(&self.profile().await?, &task);
        self.gateway.save_profile(&profile).await?;
        self.publish_to_leaderboard(&profile).await?;
        info!(task_id = id, next_due = %task.next_due, points = task.points, "completed task");
        Ok(TaskCompleted { task, profile })
    }

    // ── Projects ────────────────────────────────────────────────

    pub async fn log_project(&self, draft: ProjectDraft) -> Result<ProjectLogged> {
        let now = self.now();
        let profile = self.profile().await?;
        let projects = self.gateway.projects().await?;
        let id = fresh_id(now, projects.iter().map(|p| p.id));
        let project = draft.into_project(id, now, profile.username.clone());

        let logged = record_project(&profile, &projects, project);
        self.gateway.save_projects(&logged.projects).await?;
        self.gateway.save_profile(&logged.profile).await?;
        self.publish_to_leaderboard(&logged.profile).await?;
        for badge in &logged.newly_awarded {
            info!(badge = %badge, username = %logged.profile.username, "badge awarded");
        }
        Ok(logged)
    }

    // ── Community ───────────────────────────────────────────────

    pub async fn share(&self, project_id: ProjectId, kind: PostKind) -> Result<CommunityPost> {
        let profile = self.profile().await?;
        let projects = self.gateway.projects().await?;
        let posts = self.gateway.community_posts().await?;

        let shared = share_project(&posts, &projects, project_id, &profile, kind, self.now())?;
        self.gateway.save_community_posts(&shared.posts).await?;
        self.gateway.save_projects(&shared.projects).await?;
        shared
            .posts
            .into_iter()
            .next()
            .context("feed is empty after sharing")
    }

    /// Like a post; returns its new like count, or `None` for an unknown id.
    pub async fn like(&self, post_id: PostId) -> Result<Option<u32>> {
        let posts = like_post(&self.gateway.community_posts().await?, post_id);
        let likes = posts.iter().find(|p| p.id == post_id).map(|p| p.likes);
        if likes.is_some() {
            self.gateway.save_community_posts(&posts).await?;
        }
        Ok(likes)
    }

    pub async fn feed(&self) -> Result<Vec<CommunityPost>> {
        Ok(self.gateway.community_posts().await?)
    }

    /// The leaderboard with the current user's row refreshed, plus their rank.
    pub async fn leaderboard(&self) -> Result<(Vec<LeaderboardEntry>, UserProfile, Option<usize>)> {
        let profile = self.profile().await?;
        let board = self.publish_to_leaderboard(&profile).await?;
        let rank = rank_of(&board, &profile.username);
        Ok((board, profile, rank))
    }
}

/// Millisecond timestamp id, bumped past any existing id.
fn fresh_id(now: DateTime<Utc>, existing: impl Iterator<Item = i64>) -> i64 {
    let candidate = now.timestamp_millis();
    match existing.max() {
        Some(max) if max >= candidate => max + 1,
        _ => candidate,
    }
}
