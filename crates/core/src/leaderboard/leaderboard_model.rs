//! Leaderboard domain models.

use serde::{Deserialize, Serialize};

/// One unranked row as returned by the remote store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub user_id: String,
    pub display_name: String,
    pub total_points: i64,
    pub current_streak: i64,
}

/// A ranked entry as served to the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub display_name: String,
    pub total_points: i64,
    pub current_streak: i64,
    pub level: i64,
    /// 1-based position in the sorted result, not a stored field.
    pub rank: i64,
}
