//! Badge evaluator.
//!
//! [`evaluate_badges`] takes a project history (newest first) and a profile
//! snapshot and returns the updated badge set plus the badges that were not
//! present before. It never removes a badge, and re-running it on its own
//! output awards nothing new.

mod rules;

use indexmap::IndexSet;
use tracing::debug;

use fixitup_core::{Project, UserProfile};

use crate::badges::BADGE_RULES;

use rules::{earned_by, History};

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeEvaluation {
    /// Previous badges followed by the newly awarded ones.
    pub badges: IndexSet<String>,
    /// Badges first earned in this evaluation, in rule-checking order.
    pub newly_awarded: Vec<String>,
}

impl BadgeEvaluation {
    /// A copy of `profile` carrying the evaluated badge set.
    pub fn apply_to(&self, profile: &UserProfile) -> UserProfile {
        UserProfile {
            badges: self.badges.clone(),
            ..profile.clone()
        }
    }
}

/// Derive the badge set for `profile` given its project history.
///
/// `projects` is ordered newest first; the first entry is treated as the
/// most recently logged project.
pub fn evaluate_badges(projects: &[Project], profile: &UserProfile) -> BadgeEvaluation {
    let history = History::new(projects, profile);
    let mut badges = profile.badges.clone();
    let mut newly_awarded = Vec::new();

    for rule in BADGE_RULES {
        for name in earned_by(rule, &history) {
            if badges.contains(&name) {
                continue;
            }
            debug!(badge = %name, rule = ?rule, "badge earned");
            badges.insert(name.clone());
            newly_awarded.push(name);
        }
    }

    BadgeEvaluation {
        badges,
        newly_awarded,
    }
}

#[cfg(test)]
mod tests;
