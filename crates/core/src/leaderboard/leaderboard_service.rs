use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::{debug, warn};

use crate::checkins::level_for_points;
use crate::constants::LEADERBOARD_CACHE_SECS;
use crate::errors::Result;

use super::leaderboard_model::{LeaderboardEntry, LeaderboardRow};
use super::leaderboard_traits::{LeaderboardServiceTrait, LeaderboardStoreTrait};

struct CachedBoard {
    fetched_at: Instant,
    entries: Vec<LeaderboardEntry>,
}

/// Leaderboard read path.
///
/// Rows come from the remote store; ordering is made fully deterministic
/// here (points desc, streak desc, user id asc) so equal point totals always
/// rank the same way. The last successful fetch is kept for a short interval
/// and served when the remote store is unreachable.
pub struct LeaderboardService {
    store: Arc<dyn LeaderboardStoreTrait>,
    cache_ttl: Duration,
    cache: RwLock<Option<CachedBoard>>,
}

impl LeaderboardService {
    pub fn new(store: Arc<dyn LeaderboardStoreTrait>) -> Self {
        Self::with_cache_ttl(store, Duration::from_secs(LEADERBOARD_CACHE_SECS))
    }

    pub fn with_cache_ttl(store: Arc<dyn LeaderboardStoreTrait>, cache_ttl: Duration) -> Self {
        LeaderboardService {
            store,
            cache_ttl,
            cache: RwLock::new(None),
        }
    }

    /// Deterministic ordering and 1-based ranks.
    fn rank_rows(mut rows: Vec<LeaderboardRow>) -> Vec<LeaderboardEntry> {
        rows.sort_by(|a, b| {
            b.total_points
                .cmp(&a.total_points)
                .then_with(|| b.current_streak.cmp(&a.current_streak))
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        rows.into_iter()
            .enumerate()
            .map(|(index, row)| LeaderboardEntry {
                level: level_for_points(row.total_points),
                rank: index as i64 + 1,
                user_id: row.user_id,
                display_name: row.display_name,
                total_points: row.total_points,
                current_streak: row.current_streak,
            })
            .collect()
    }

    fn cached_entries(&self, limit: i64) -> Option<Vec<LeaderboardEntry>> {
        let cache = self.cache.read().unwrap();
        let board = cache.as_ref()?;
        if board.fetched_at.elapsed() >= self.cache_ttl {
            return None;
        }
        Some(board.entries.iter().take(limit as usize).cloned().collect())
    }
}

#[async_trait]
impl LeaderboardServiceTrait for LeaderboardService {
    async fn get_leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>> {
        match self.store.top_by_points(limit).await {
            Ok(rows) => {
                let entries = Self::rank_rows(rows);
                *self.cache.write().unwrap() = Some(CachedBoard {
                    fetched_at: Instant::now(),
                    entries: entries.clone(),
                });
                Ok(entries)
            }
            Err(e) if e.is_unavailable() => {
                if let Some(entries) = self.cached_entries(limit) {
                    debug!("Serving leaderboard from cache after remote failure");
                    return Ok(entries);
                }
                warn!("Leaderboard fetch failed with no usable cache: {}", e);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}
