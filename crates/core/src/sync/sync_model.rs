//! Offline sync queue models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checkins::{CheckInRecord, UserStats};

/// A check-in that was written to the offline store and is waiting to be
/// replayed against the remote store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PendingCheckIn {
    /// Monotonically increasing enqueue order; replay is strictly FIFO.
    pub sequence: i64,
    pub user_id: String,
    pub check_in: CheckInRecord,
    /// Stats snapshot as computed at enqueue time.
    pub stats: UserStats,
    pub enqueued_at: DateTime<Utc>,
}

/// Input model for enqueueing a pending check-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPendingCheckIn {
    pub user_id: String,
    pub check_in: CheckInRecord,
    pub stats: UserStats,
    pub enqueued_at: DateTime<Utc>,
}

/// How a reconciliation run ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SyncRunState {
    /// The queue was drained (possibly partially, if connectivity dropped
    /// mid-run).
    Completed,
    /// Another drain was already in progress; nothing was replayed.
    AlreadyRunning,
    /// The connectivity probe reported offline; nothing was attempted.
    Offline,
}

/// Summary of one reconciliation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyncRunSummary {
    pub state: SyncRunState,
    pub replayed: usize,
    pub dropped: usize,
    pub remaining: usize,
}

impl SyncRunSummary {
    pub fn skipped(state: SyncRunState, remaining: usize) -> Self {
        SyncRunSummary {
            state,
            replayed: 0,
            dropped: 0,
            remaining,
        }
    }
}

/// Connectivity plus queue depth, for status endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub online: bool,
    pub pending: i64,
}
