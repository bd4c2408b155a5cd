//! Leaderboard ranking by cumulative points.

use fixitup_core::{LeaderboardEntry, UserProfile};

/// Insert or replace the row for `profile.username`, then order by points,
/// highest first. Rows with equal points keep their relative order.
pub fn upsert_leaderboard(entries: &[LeaderboardEntry], profile: &UserProfile) -> Vec<LeaderboardEntry> {
    let mut board = entries.to_vec();
    match board.iter_mut().find(|e| e.username == profile.username) {
        Some(existing) => *existing = profile.clone(),
        None => board.push(profile.clone()),
    }
    board.sort_by(|a, b| b.points.cmp(&a.points));
    board
}

/// 1-based rank of `username`, if present.
pub fn rank_of(entries: &[LeaderboardEntry], username: &str) -> Option<usize> {
    entries
        .iter()
        .position(|e| e.username == username)
        .map(|i| i + 1)
}
