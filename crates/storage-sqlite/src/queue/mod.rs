//! Pending-sync queue storage.

mod model;
mod repository;

pub use model::{NewPendingCheckInDB, PendingCheckInDB, STATUS_DROPPED, STATUS_PENDING};
pub use repository::SyncQueueRepository;
