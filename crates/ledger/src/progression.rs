//! Profile progression: applying completed projects and maintenance tasks.

use chrono::{DateTime, Utc};
use tracing::debug;

use fixitup_core::{
    project_points, Failure, MaintenanceTask, Project, ProjectId, UserProfile, STATUS_COMPLETED,
};

use crate::evaluator::evaluate_badges;

/// User input for a new project, before points are computed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDraft {
    pub title: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    /// Label from the user or the external difficulty assessor.
    pub difficulty: String,
    pub description: String,
    pub failures: Vec<Failure>,
}

impl ProjectDraft {
    /// Finalize into a completed project, scoring it from the point table.
    pub fn into_project(
        self,
        id: ProjectId,
        date: DateTime<Utc>,
        username: impl Into<String>,
    ) -> Project {
        let points = project_points(self.difficulty.parse().ok(), &self.failures);
        Project {
            id,
            title: self.title,
            category: self.category,
            tags: self.tags,
            difficulty: self.difficulty,
            description: self.description,
            failures: self.failures,
            points,
            status: Some(STATUS_COMPLETED.to_string()),
            shared: false,
            date: Some(date),
            username: Some(username.into()),
        }
    }
}

/// State after logging a project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectLogged {
    pub profile: UserProfile,
    /// History with the new project first.
    pub projects: Vec<Project>,
    pub newly_awarded: Vec<String>,
}

/// Log a completed project: prepend it to the history as Completed, credit
/// its points, bump the completed counter, and evaluate badges against the
/// result.
pub fn record_project(profile: &UserProfile, projects: &[Project], project: Project) -> ProjectLogged {
    let mut project = project;
    project.status = Some(STATUS_COMPLETED.to_string());

    let mut next = profile.clone();
    next.add_points(project.points);
    next.completed_projects = next.completed_projects.saturating_add(1);

    let mut history = Vec::with_capacity(projects.len() + 1);
    history.push(project);
    history.extend_from_slice(projects);

    let evaluation = evaluate_badges(&history, &next);
    next.badges = evaluation.badges;

    debug!(
        username = %next.username,
        points = next.points,
        level = next.level,
        completed = next.completed_projects,
        new_badges = evaluation.newly_awarded.len(),
        "recorded project"
    );

    ProjectLogged {
        profile: next,
        projects: history,
        newly_awarded: evaluation.newly_awarded,
    }
}

/// Credit a completed maintenance task's points to the profile.
pub fn record_task_completion(profile: &UserProfile, task: &MaintenanceTask) -> UserProfile {
    let mut next = profile.clone();
    next.add_points(task.points);
    debug!(
        username = %next.username,
        task_id = %task.id,
        points = next.points,
        "recorded task completion"
    );
    next
}

/// Placeholder name for a new profile, e.g. `DIYer417`.
pub fn generated_username(seed: i64) -> String {
    format!("DIYer{}", seed.rem_euclid(1000))
}
