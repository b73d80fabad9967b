use crate::errors::Result;
use async_trait::async_trait;

use super::leaderboard_model::{LeaderboardEntry, LeaderboardRow};

/// Trait for the store backing the leaderboard read path.
#[async_trait]
pub trait LeaderboardStoreTrait: Send + Sync {
    /// Top rows ordered by total points descending. Tie order within equal
    /// point totals is not guaranteed by the store.
    async fn top_by_points(&self, limit: i64) -> Result<Vec<LeaderboardRow>>;
}

/// Trait for leaderboard service operations.
#[async_trait]
pub trait LeaderboardServiceTrait: Send + Sync {
    async fn get_leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>>;
}
