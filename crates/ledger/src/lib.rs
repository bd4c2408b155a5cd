//! Gamification ledger for completed DIY work.
//!
//! This crate provides:
//! - The badge rule set and a pure evaluator deriving a monotone badge set
//! - Profile progression when projects and maintenance tasks are completed
//! - Leaderboard ranking and community feed sharing

pub mod badges;
pub mod evaluator;
pub mod feed;
pub mod leaderboard;
pub mod progression;

pub use badges::{BadgeRule, BADGE_RULES};
pub use evaluator::{evaluate_badges, BadgeEvaluation};
pub use feed::{like_post, share_project, ShareError, SharedProject};
pub use leaderboard::{rank_of, upsert_leaderboard};
pub use progression::{
    generated_username, record_project, record_task_completion, ProjectDraft, ProjectLogged,
};
