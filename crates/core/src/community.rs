//! Community feed posts and leaderboard entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::UserProfile;
use crate::project::Project;

pub type PostId = i64;

/// Maximum number of posts retained in the feed.
pub const FEED_CAPACITY: usize = 50;

/// Whether a shared project is being celebrated or laughed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Win,
    Fail,
}

/// A project shared to the community feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    pub id: PostId,
    pub username: String,
    pub points: i64,
    pub level: i64,
    pub project: Project,
    #[serde(rename = "type")]
    pub kind: PostKind,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments: Vec<serde_json::Value>,
    pub date: DateTime<Utc>,
}

/// Leaderboard rows are snapshots of user profiles.
pub type LeaderboardEntry = UserProfile;
