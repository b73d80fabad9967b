use crate::errors::Result;
use async_trait::async_trait;

use super::sync_model::{NewPendingCheckIn, PendingCheckIn, SyncRunSummary, SyncStatus};

/// Trait for the pending-sync queue.
///
/// Append-only from the check-in write path, drained FIFO by the
/// reconciliation service. Backed by the local store, so all operations are
/// synchronous.
pub trait SyncQueueRepositoryTrait: Send + Sync {
    fn enqueue(&self, item: NewPendingCheckIn) -> Result<PendingCheckIn>;
    /// Pending items in enqueue order.
    fn pending(&self) -> Result<Vec<PendingCheckIn>>;
    /// Remove a successfully replayed item.
    fn remove(&self, sequence: i64) -> Result<()>;
    /// Take an unreplayable item out of the pending set, keeping an audit
    /// record of why it was dropped.
    fn mark_dropped(&self, sequence: i64, reason: &str) -> Result<()>;
    fn pending_count(&self) -> Result<i64>;
}

/// Trait for probing whether the remote store is reachable.
#[async_trait]
pub trait ConnectivityProbeTrait: Send + Sync {
    /// One round-trip against the remote store's health endpoint.
    async fn probe(&self) -> bool;
}

/// Trait for the reconciliation service.
#[async_trait]
pub trait SyncServiceTrait: Send + Sync {
    /// Replay the pending queue against the remote store once. Concurrent
    /// calls are mutually exclusive; the loser returns `AlreadyRunning`.
    async fn run_once(&self) -> Result<SyncRunSummary>;
    async fn status(&self) -> Result<SyncStatus>;
}
