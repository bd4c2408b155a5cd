//! User profile: cumulative points, derived level and the badge set.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Points needed per level.
pub const POINTS_PER_LEVEL: i64 = 100;

/// Level derived from a point total: `floor(points / 100) + 1`.
///
/// Uses floor division, so a negative total yields a level of 0 or below.
pub fn level_for_points(points: i64) -> i64 {
    points.div_euclid(POINTS_PER_LEVEL) + 1
}

/// Per-user progress record.
///
/// `badges` is insertion-ordered (the last entry is the most recently earned)
/// and never contains duplicates. Badges are never removed once present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default = "default_level")]
    pub level: i64,
    #[serde(default)]
    pub completed_projects: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub badges: IndexSet<String>,
}

fn default_level() -> i64 {
    1
}

impl UserProfile {
    /// A fresh profile with no progress.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            points: 0,
            level: 1,
            completed_projects: 0,
            streak: 0,
            badges: IndexSet::new(),
        }
    }

    /// Whether the badge has already been earned.
    pub fn has_badge(&self, name: &str) -> bool {
        self.badges.contains(name)
    }

    /// Most recently earned badge.
    pub fn latest_badge(&self) -> Option<&str> {
        self.badges.last().map(String::as_str)
    }

    /// Add `delta` points and re-derive the level.
    pub fn add_points(&mut self, delta: i64) {
        self.points += delta;
        self.level = level_for_points(self.points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_formula() {
        assert_eq!(level_for_points(0), 1);
        assert_eq!(level_for_points(99), 1);
        assert_eq!(level_for_points(100), 2);
        assert_eq!(level_for_points(250), 3);
        assert_eq!(level_for_points(-1), 0);
        assert_eq!(level_for_points(-100), 0);
        assert_eq!(level_for_points(-101), -1);
    }

    #[test]
    fn profile_without_badges_migrates_to_empty_set() {
        let json = r#"{"username": "DIYer42", "points": 120, "level": 2, "completedProjects": 3, "streak": 0}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert!(profile.badges.is_empty());
        assert_eq!(profile.completed_projects, 3);
    }

    #[test]
    fn duplicate_badges_collapse_on_load() {
        let json = r#"{"username": "u", "badges": ["Novice Fixer", "Home Hero", "Novice Fixer"]}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.badges.len(), 2);
        assert_eq!(profile.latest_badge(), Some("Home Hero"));
        assert_eq!(profile.level, 1);
    }

    #[test]
    fn add_points_updates_level() {
        let mut profile = UserProfile::new("tester");
        profile.add_points(150);
        assert_eq!((profile.points, profile.level), (150, 2));
        profile.add_points(-200);
        assert_eq!((profile.points, profile.level), (-50, 0));
    }
}
