//! Badge rule catalog.
//!
//! Rules are checked in the order of [`BADGE_RULES`]; that order is also the
//! order in which newly earned badges are reported.

use std::fmt;

/// Projects needed in one category for its mastery badge.
pub const CATEGORY_MASTERY_THRESHOLD: usize = 5;

/// Awarded when the latest project had no recorded failures.
pub const FLAWLESS_FINISH: &str = "Flawless Finish";

/// Awarded when the latest project was of the top difficulty tier.
pub const TACKLED_THE_HARDEST: &str = "Tackled the Hardest";

/// A single badge-awarding rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeRule {
    /// At least `threshold` completed projects.
    CompletedProjects { threshold: u32, name: &'static str },
    /// Cumulative profile points at least `threshold`.
    PointTotal { threshold: i64, name: &'static str },
    /// One badge per category label with at least `threshold` projects.
    CategoryMastery { threshold: usize },
    /// Latest project finished without failures.
    FlawlessLatest,
    /// Latest project was of the top difficulty tier.
    HardestLatest,
}

/// The full rule set, in checking order.
pub const BADGE_RULES: &[BadgeRule] = &[
    BadgeRule::CompletedProjects { threshold: 1, name: "Novice Fixer" },
    BadgeRule::CompletedProjects { threshold: 5, name: "Home Hero" },
    BadgeRule::CompletedProjects { threshold: 10, name: "DIY Dynamo" },
    BadgeRule::CompletedProjects { threshold: 20, name: "Reno Rockstar" },
    BadgeRule::PointTotal { threshold: 100, name: "Century Club" },
    BadgeRule::PointTotal { threshold: 500, name: "Handy Legend" },
    BadgeRule::PointTotal { threshold: 1000, name: "Master Builder" },
    BadgeRule::CategoryMastery { threshold: CATEGORY_MASTERY_THRESHOLD },
    BadgeRule::FlawlessLatest,
    BadgeRule::HardestLatest,
];

/// Badge name for mastering a category, e.g. "Electrical Master".
pub fn category_badge_name(category: &str) -> String {
    format!("{} Master", category.trim())
}

impl fmt::Display for BadgeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadgeRule::CompletedProjects { threshold, name } => {
                write!(f, "{name}: complete {threshold} project(s)")
            }
            BadgeRule::PointTotal { threshold, name } => write!(f, "{name}: reach {threshold} points"),
            BadgeRule::CategoryMastery { threshold } => {
                write!(f, "<Category> Master: {threshold} projects in one category")
            }
            BadgeRule::FlawlessLatest => write!(f, "{FLAWLESS_FINISH}: finish a project with no failures"),
            BadgeRule::HardestLatest => write!(f, "{TACKLED_THE_HARDEST}: finish a top-tier project"),
        }
    }
}
