use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};

use crate::checkins::CheckInStoreTrait;
use crate::errors::Result;

use super::connectivity::ConnectivityMonitor;
use super::sync_model::{SyncRunState, SyncRunSummary, SyncStatus};
use super::sync_traits::{SyncQueueRepositoryTrait, SyncServiceTrait};

/// Replays offline check-ins against the remote store once connectivity is
/// restored.
///
/// Replay order is strictly FIFO by enqueue sequence; replaying out of order
/// could recompute an incorrect streak on the remote side. An item that the
/// remote store rejects for business reasons is dropped with an audit record
/// instead of being retried forever.
pub struct SyncService {
    remote: Arc<dyn CheckInStoreTrait>,
    queue: Arc<dyn SyncQueueRepositoryTrait>,
    connectivity: Arc<ConnectivityMonitor>,
    draining: AtomicBool,
}

impl SyncService {
    pub fn new(
        remote: Arc<dyn CheckInStoreTrait>,
        queue: Arc<dyn SyncQueueRepositoryTrait>,
        connectivity: Arc<ConnectivityMonitor>,
    ) -> Self {
        SyncService {
            remote,
            queue,
            connectivity,
            draining: AtomicBool::new(false),
        }
    }

    async fn drain(&self) -> Result<SyncRunSummary> {
        let pending = self.queue.pending()?;
        let mut replayed = 0;
        let mut dropped = 0;

        for item in pending {
            match self
                .remote
                .record_check_in(&item.check_in, &item.stats)
                .await
            {
                Ok(()) => {
                    self.queue.remove(item.sequence)?;
                    replayed += 1;
                }
                Err(e) if e.is_unavailable() => {
                    // Connectivity dropped mid-drain; keep the remainder in
                    // order for the next run.
                    warn!("Sync interrupted at #{}: {}", item.sequence, e);
                    self.connectivity.mark_offline();
                    break;
                }
                Err(e) => {
                    // Replaying would conflict with what the remote store
                    // already holds (or failed in a non-transient way).
                    warn!(
                        "Dropping queued check-in #{} for {}: {}",
                        item.sequence, item.user_id, e
                    );
                    self.queue.mark_dropped(item.sequence, &e.to_string())?;
                    dropped += 1;
                }
            }
        }

        let remaining = self.queue.pending_count()? as usize;
        info!(
            "Sync run complete: {} replayed, {} dropped, {} remaining",
            replayed, dropped, remaining
        );
        Ok(SyncRunSummary {
            state: SyncRunState::Completed,
            replayed,
            dropped,
            remaining,
        })
    }
}

#[async_trait]
impl SyncServiceTrait for SyncService {
    async fn run_once(&self) -> Result<SyncRunSummary> {
        let remaining = self.queue.pending_count()? as usize;
        if remaining == 0 {
            return Ok(SyncRunSummary::skipped(SyncRunState::Completed, 0));
        }
        if !self.connectivity.is_online().await {
            return Ok(SyncRunSummary::skipped(SyncRunState::Offline, remaining));
        }
        if self
            .draining
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(SyncRunSummary::skipped(
                SyncRunState::AlreadyRunning,
                remaining,
            ));
        }

        let result = self.drain().await;
        self.draining.store(false, Ordering::SeqCst);
        result
    }

    async fn status(&self) -> Result<SyncStatus> {
        Ok(SyncStatus {
            online: self.connectivity.is_online().await,
            pending: self.queue.pending_count()?,
        })
    }
}
