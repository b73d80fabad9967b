//! Background scheduler for periodic queue reconciliation.
//!
//! Runs a fixed-interval drain so queued offline check-ins are replayed as
//! soon as the cloud store is reachable again.

use std::sync::Arc;

use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};

use goodcare_core::sync::SyncRunState;

use crate::main_lib::AppState;

/// Initial delay before the first run (let the server fully start)
const INITIAL_DELAY_SECS: u64 = 10;

/// Starts the background reconciliation scheduler.
pub fn start_sync_scheduler(state: Arc<AppState>, interval_secs: u64) {
    tokio::spawn(async move {
        info!("Sync scheduler started ({}s interval)", interval_secs);

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        let mut tick = interval(Duration::from_secs(interval_secs.max(1)));
        loop {
            tick.tick().await;
            run_scheduled_sync(&state).await;
        }
    });
}

/// Runs a single scheduled reconciliation.
async fn run_scheduled_sync(state: &Arc<AppState>) {
    match state.sync_service.run_once().await {
        Ok(summary) => match summary.state {
            SyncRunState::Completed if summary.replayed + summary.dropped > 0 => {
                info!(
                    "Scheduled sync replayed {} check-ins ({} dropped, {} remaining)",
                    summary.replayed, summary.dropped, summary.remaining
                );
            }
            SyncRunState::Offline => {
                debug!(
                    "Scheduled sync skipped: remote store offline ({} pending)",
                    summary.remaining
                );
            }
            _ => debug!("Scheduled sync: nothing to replay"),
        },
        Err(e) => warn!("Scheduled sync failed: {}", e),
    }
}
