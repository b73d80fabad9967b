use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use uuid::Uuid;

use crate::constants::{CHECK_IN_COOLDOWN_HOURS, DEFAULT_NOTE_MAX_CHARS, MOOD_MAX, MOOD_MIN};
use crate::errors::Result;
use crate::sync::{ConnectivityMonitor, NewPendingCheckIn, SyncQueueRepositoryTrait};

use super::checkins_errors::CheckInError;
use super::checkins_model::{CheckInReceipt, CheckInRecord, Eligibility, NewCheckIn, UserStats};
use super::checkins_traits::{CheckInServiceTrait, CheckInStoreTrait, OfflineStoreTrait};
use super::rewards_calculator::{apply_check_in, compute_reward};
use async_trait::async_trait;

/// The check-in pipeline: eligibility gate, reward computation, and durable
/// persistence with offline fallback.
///
/// The remote store is the primary backend; when it is unreachable the write
/// lands in the local store and is queued for reconciliation. Business-rule
/// rejections from the remote store are never retried offline.
pub struct CheckInService {
    remote: Arc<dyn CheckInStoreTrait>,
    offline: Arc<dyn OfflineStoreTrait>,
    queue: Arc<dyn SyncQueueRepositoryTrait>,
    connectivity: Arc<ConnectivityMonitor>,
    note_max_chars: usize,
}

impl CheckInService {
    pub fn new(
        remote: Arc<dyn CheckInStoreTrait>,
        offline: Arc<dyn OfflineStoreTrait>,
        queue: Arc<dyn SyncQueueRepositoryTrait>,
        connectivity: Arc<ConnectivityMonitor>,
    ) -> Self {
        CheckInService {
            remote,
            offline,
            queue,
            connectivity,
            note_max_chars: DEFAULT_NOTE_MAX_CHARS,
        }
    }

    /// Override the note length cap.
    pub fn with_note_limit(mut self, note_max_chars: usize) -> Self {
        self.note_max_chars = note_max_chars;
        self
    }

    fn validate(&self, submission: &NewCheckIn) -> Result<()> {
        if !(MOOD_MIN..=MOOD_MAX).contains(&submission.mood_value) {
            return Err(CheckInError::MoodOutOfRange(submission.mood_value).into());
        }
        if let Some(note) = submission.trimmed_note() {
            let actual = note.chars().count();
            if actual > self.note_max_chars {
                return Err(CheckInError::NoteTooLong {
                    max: self.note_max_chars,
                    actual,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Load the stats snapshot, remote first, falling back to the local
    /// mirror when the remote store is unreachable.
    async fn load_stats(&self, user_id: &str) -> Result<Option<UserStats>> {
        if self.connectivity.is_online().await {
            match self.remote.get_user_stats(user_id).await {
                Ok(stats) => {
                    self.connectivity.mark_online();
                    if let Some(ref snapshot) = stats {
                        if let Err(e) = self.offline.put_user_stats(snapshot) {
                            warn!("Failed to mirror stats for {}: {}", user_id, e);
                        }
                    }
                    return Ok(stats.map(UserStats::with_recomputed_level));
                }
                Err(e) if e.is_unavailable() => {
                    warn!("Remote stats read failed, using offline mirror: {}", e);
                    self.connectivity.mark_offline();
                }
                Err(e) => return Err(e),
            }
        }
        Ok(self
            .offline
            .get_user_stats(user_id)?
            .map(UserStats::with_recomputed_level))
    }

    /// When still inside the cooldown window, the instant it ends.
    ///
    /// An attempt at exactly `last_check_in_at + 8h` is allowed; one second
    /// earlier is denied.
    pub fn cooldown_until(stats: Option<&UserStats>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let last_at = stats.and_then(|s| s.last_check_in_at)?;
        let next = last_at + Duration::hours(CHECK_IN_COOLDOWN_HOURS);
        (now < next).then_some(next)
    }
}

#[async_trait]
impl CheckInServiceTrait for CheckInService {
    async fn can_check_in(&self, user_id: &str) -> Result<Eligibility> {
        let stats = self.load_stats(user_id).await?;
        Ok(match Self::cooldown_until(stats.as_ref(), Utc::now()) {
            Some(next) => Eligibility::denied_until(next),
            None => Eligibility::allowed(),
        })
    }

    async fn record_check_in(
        &self,
        user_id: &str,
        submission: NewCheckIn,
    ) -> Result<CheckInReceipt> {
        self.validate(&submission)?;

        let stats = self.load_stats(user_id).await?;
        let now = Utc::now();
        if let Some(next_eligible_at) = Self::cooldown_until(stats.as_ref(), now) {
            return Err(CheckInError::AlreadyCheckedIn { next_eligible_at }.into());
        }

        let today = now.date_naive();
        let note = submission.trimmed_note().map(str::to_string);
        let reward = compute_reward(stats.as_ref(), today, note.is_some())?;
        let record = CheckInRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            checked_on: today,
            mood_value: submission.mood_value,
            note,
            points_awarded: reward.total_points,
            streak_at_check_in: reward.new_streak,
            multiplier_applied: reward.multiplier,
            created_at: now,
        };
        let updated = apply_check_in(stats.as_ref(), user_id, &reward, today, now);

        if self.connectivity.is_online().await {
            match self.remote.record_check_in(&record, &updated).await {
                Ok(()) => {
                    self.connectivity.mark_online();
                    if let Err(e) = self.offline.store_check_in(&record, &updated) {
                        warn!("Failed to mirror check-in {} locally: {}", record.id, e);
                    }
                    debug!("Check-in {} recorded remotely for {}", record.id, user_id);
                    return Ok(CheckInReceipt {
                        check_in: record,
                        stats: updated,
                        is_offline: false,
                    });
                }
                Err(e) if e.is_unavailable() => {
                    // The connectivity cache said online but the write failed;
                    // the cache is advisory, the failed write is authoritative.
                    warn!("Remote check-in write failed, falling back: {}", e);
                    self.connectivity.mark_offline();
                }
                Err(e) if e.is_constraint_violation() => {
                    // A concurrent attempt won the race. Hard failure, never
                    // replayed offline.
                    return Err(CheckInError::DuplicateForDate(today).into());
                }
                Err(e) => return Err(e),
            }
        }

        match self.offline.store_check_in(&record, &updated) {
            Ok(()) => {}
            Err(e) if e.is_constraint_violation() => {
                return Err(CheckInError::DuplicateForDate(today).into());
            }
            Err(e) => return Err(e),
        }
        let pending = self.queue.enqueue(NewPendingCheckIn {
            user_id: user_id.to_string(),
            check_in: record.clone(),
            stats: updated.clone(),
            enqueued_at: now,
        })?;
        debug!(
            "Check-in {} stored offline for {}, queued as #{}",
            record.id, user_id, pending.sequence
        );

        Ok(CheckInReceipt {
            check_in: record,
            stats: updated,
            is_offline: true,
        })
    }

    async fn get_user_stats(&self, user_id: &str) -> Result<UserStats> {
        Ok(self
            .load_stats(user_id)
            .await?
            .unwrap_or_else(|| UserStats::new(user_id)))
    }

    async fn list_recent_check_ins(&self, user_id: &str, limit: i64) -> Result<Vec<CheckInRecord>> {
        if self.connectivity.is_online().await {
            match self.remote.list_check_ins(user_id, limit).await {
                Ok(records) => {
                    self.connectivity.mark_online();
                    return Ok(records);
                }
                Err(e) if e.is_unavailable() => {
                    warn!("Remote history read failed, using offline mirror: {}", e);
                    self.connectivity.mark_offline();
                }
                Err(e) => return Err(e),
            }
        }
        self.offline.list_check_ins(user_id, limit)
    }
}
