use crate::errors::Result;
use async_trait::async_trait;

use super::checkins_model::{CheckInReceipt, CheckInRecord, Eligibility, NewCheckIn, UserStats};

/// Trait for the primary (remote) check-in store.
///
/// Implementations must apply the record insert and the stats update as one
/// atomic unit, and must enforce uniqueness on (user, calendar date).
#[async_trait]
pub trait CheckInStoreTrait: Send + Sync {
    async fn get_user_stats(&self, user_id: &str) -> Result<Option<UserStats>>;
    /// Persist the record and the updated stats atomically.
    async fn record_check_in(&self, record: &CheckInRecord, stats: &UserStats) -> Result<()>;
    async fn list_check_ins(&self, user_id: &str, limit: i64) -> Result<Vec<CheckInRecord>>;
}

/// Trait for the local, synchronous fallback store.
///
/// The offline store is user-scoped: it mirrors the caller's own records and
/// stats so check-ins and reads keep working while the remote store is
/// unreachable. Writes never suspend.
pub trait OfflineStoreTrait: Send + Sync {
    fn get_user_stats(&self, user_id: &str) -> Result<Option<UserStats>>;
    /// Insert the record and upsert the stats row in one transaction.
    fn store_check_in(&self, record: &CheckInRecord, stats: &UserStats) -> Result<()>;
    /// Mirror a stats row fetched from the remote store.
    fn put_user_stats(&self, stats: &UserStats) -> Result<()>;
    fn list_check_ins(&self, user_id: &str, limit: i64) -> Result<Vec<CheckInRecord>>;
}

/// Trait for check-in service operations, as exposed to the UI layer.
#[async_trait]
pub trait CheckInServiceTrait: Send + Sync {
    /// Eligibility gate: pure read, no side effects.
    async fn can_check_in(&self, user_id: &str) -> Result<Eligibility>;
    /// Validate, compute rewards, and persist a check-in, falling back to
    /// the offline store when the remote store is unreachable.
    async fn record_check_in(&self, user_id: &str, submission: NewCheckIn)
        -> Result<CheckInReceipt>;
    async fn get_user_stats(&self, user_id: &str) -> Result<UserStats>;
    async fn list_recent_check_ins(&self, user_id: &str, limit: i64) -> Result<Vec<CheckInRecord>>;
}
