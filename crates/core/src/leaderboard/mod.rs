//! Leaderboard module - deterministic ranking over the remote store with a
//! short-lived fallback cache.

mod leaderboard_model;
mod leaderboard_service;
mod leaderboard_traits;

pub use leaderboard_model::{LeaderboardEntry, LeaderboardRow};
pub use leaderboard_service::LeaderboardService;
pub use leaderboard_traits::{LeaderboardServiceTrait, LeaderboardStoreTrait};
