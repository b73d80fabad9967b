//! Offline sync module - pending queue, connectivity probing, and the
//! reconciliation service.

mod connectivity;
mod sync_model;
mod sync_service;
mod sync_traits;

#[cfg(test)]
mod sync_service_tests;

pub use connectivity::ConnectivityMonitor;
pub use sync_model::{
    NewPendingCheckIn, PendingCheckIn, SyncRunState, SyncRunSummary, SyncStatus,
};
pub use sync_service::SyncService;
pub use sync_traits::{ConnectivityProbeTrait, SyncQueueRepositoryTrait, SyncServiceTrait};
