//! Per-rule checks against a project history.

use std::collections::BTreeMap;

use fixitup_core::{Difficulty, Project, UserProfile};

use crate::badges::{category_badge_name, BadgeRule, FLAWLESS_FINISH, TACKLED_THE_HARDEST};

/// Read-only view of the inputs a rule may inspect.
pub(crate) struct History<'a> {
    projects: &'a [Project],
    profile: &'a UserProfile,
}

impl<'a> History<'a> {
    pub(crate) fn new(projects: &'a [Project], profile: &'a UserProfile) -> Self {
        Self { projects, profile }
    }

    /// Completed projects: the larger of the profile counter and the number
    /// of completed records in the history, so neither source can make a
    /// badge disappear.
    pub(crate) fn completed_count(&self) -> u32 {
        let in_history = self.projects.iter().filter(|p| p.is_completed()).count();
        let in_history = u32::try_from(in_history).unwrap_or(u32::MAX);
        in_history.max(self.profile.completed_projects)
    }

    pub(crate) fn points(&self) -> i64 {
        self.profile.points
    }

    pub(crate) fn latest(&self) -> Option<&'a Project> {
        self.projects.first()
    }

    /// Number of projects per category label, alphabetically keyed.
    pub(crate) fn label_counts(&self) -> BTreeMap<&'a str, usize> {
        let mut counts = BTreeMap::new();
        for project in self.projects {
            for label in project.labels() {
                *counts.entry(label).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Badge names `rule` grants for `history`, whether or not already held.
pub(crate) fn earned_by(rule: &BadgeRule, history: &History<'_>) -> Vec<String> {
    match *rule {
        BadgeRule::CompletedProjects { threshold, name } => {
            if history.completed_count() >= threshold {
                vec![name.to_string()]
            } else {
                Vec::new()
            }
        }
        BadgeRule::PointTotal { threshold, name } => {
            if history.points() >= threshold {
                vec![name.to_string()]
            } else {
                Vec::new()
            }
        }
        BadgeRule::CategoryMastery { threshold } => history
            .label_counts()
            .into_iter()
            .filter(|(_, count)| *count >= threshold)
            .map(|(label, _)| category_badge_name(label))
            .collect(),
        BadgeRule::FlawlessLatest => match history.latest() {
            Some(project) if project.failures.is_empty() => vec![FLAWLESS_FINISH.to_string()],
            _ => Vec::new(),
        },
        BadgeRule::HardestLatest => match history.latest() {
            Some(project) if project.difficulty_tier() == Some(Difficulty::TOP) => {
                vec![TACKLED_THE_HARDEST.to_string()]
            }
            _ => Vec::new(),
        },
    }
}
