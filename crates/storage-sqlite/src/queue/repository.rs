//! Repository for the pending-sync queue.

use chrono::Utc;
use diesel::prelude::*;

use goodcare_core::errors::Result;
use goodcare_core::sync::{NewPendingCheckIn, PendingCheckIn, SyncQueueRepositoryTrait};

use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::pending_check_ins;

use super::model::{NewPendingCheckInDB, PendingCheckInDB, PendingPayload, STATUS_DROPPED, STATUS_PENDING};

/// SQLite-backed pending queue.
///
/// The `sequence` column is an autoincrement primary key, which gives the
/// FIFO replay order for free. Dropped items stay in the table under the
/// `dropped` status with a reason and timestamp.
pub struct SyncQueueRepository {
    pool: DbPool,
}

impl SyncQueueRepository {
    pub fn new(pool: DbPool) -> Self {
        SyncQueueRepository { pool }
    }
}

impl SyncQueueRepositoryTrait for SyncQueueRepository {
    fn enqueue(&self, item: NewPendingCheckIn) -> Result<PendingCheckIn> {
        let mut conn = get_connection(&self.pool)?;
        let payload_json = serde_json::to_string(&PendingPayload {
            check_in: item.check_in,
            stats: item.stats,
        })?;
        let new_row = NewPendingCheckInDB {
            user_id: item.user_id,
            payload_json,
            status: STATUS_PENDING.to_string(),
            enqueued_at: item.enqueued_at.naive_utc(),
        };

        let row: PendingCheckInDB = diesel::insert_into(pending_check_ins::table)
            .values(&new_row)
            .returning(PendingCheckInDB::as_returning())
            .get_result(&mut conn)
            .map_err(StorageError::from)?;
        row.try_into()
    }

    fn pending(&self) -> Result<Vec<PendingCheckIn>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = pending_check_ins::table
            .filter(pending_check_ins::status.eq(STATUS_PENDING))
            .order(pending_check_ins::sequence.asc())
            .load::<PendingCheckInDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(PendingCheckIn::try_from).collect()
    }

    fn remove(&self, sequence: i64) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        diesel::delete(pending_check_ins::table.find(sequence))
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        Ok(())
    }

    fn mark_dropped(&self, sequence: i64, reason: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        diesel::update(pending_check_ins::table.find(sequence))
            .set((
                pending_check_ins::status.eq(STATUS_DROPPED),
                pending_check_ins::dropped_at.eq(Some(Utc::now().naive_utc())),
                pending_check_ins::dropped_reason.eq(Some(reason)),
            ))
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        Ok(())
    }

    fn pending_count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let count = pending_check_ins::table
            .filter(pending_check_ins::status.eq(STATUS_PENDING))
            .count()
            .get_result(&mut conn)
            .map_err(StorageError::from)?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations};
    use chrono::NaiveDate;
    use goodcare_core::checkins::{CheckInRecord, UserStats};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn make_repo() -> (SyncQueueRepository, tempfile::TempDir) {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("test.db");
        let pool = create_pool(db_path.to_str().unwrap()).unwrap();
        run_migrations(&pool).unwrap();
        (SyncQueueRepository::new(pool), tmp)
    }

    fn item(user_id: &str, day: u32) -> NewPendingCheckIn {
        let checked_on = NaiveDate::from_ymd_opt(2026, 3, day).unwrap();
        NewPendingCheckIn {
            user_id: user_id.to_string(),
            check_in: CheckInRecord {
                id: format!("{}-{}", user_id, day),
                user_id: user_id.to_string(),
                checked_on,
                mood_value: 3,
                note: None,
                points_awarded: 10,
                streak_at_check_in: 1,
                multiplier_applied: dec!(1.0),
                created_at: Utc::now(),
            },
            stats: UserStats::new(user_id),
            enqueued_at: Utc::now(),
        }
    }

    #[test]
    fn test_sequences_are_monotonic_and_fifo() {
        let (repo, _tmp) = make_repo();

        let first = repo.enqueue(item("user-1", 1)).unwrap();
        let second = repo.enqueue(item("user-1", 2)).unwrap();
        let third = repo.enqueue(item("user-2", 1)).unwrap();
        assert!(first.sequence < second.sequence);
        assert!(second.sequence < third.sequence);

        let pending = repo.pending().unwrap();
        assert_eq!(pending.len(), 3);
        assert_eq!(pending[0].sequence, first.sequence);
        assert_eq!(pending[0].check_in.id, "user-1-1");
        assert_eq!(pending[2].user_id, "user-2");
    }

    #[test]
    fn test_remove_dequeues() {
        let (repo, _tmp) = make_repo();

        let first = repo.enqueue(item("user-1", 1)).unwrap();
        repo.enqueue(item("user-1", 2)).unwrap();

        repo.remove(first.sequence).unwrap();
        assert_eq!(repo.pending_count().unwrap(), 1);
        assert_eq!(repo.pending().unwrap()[0].check_in.id, "user-1-2");
    }

    #[test]
    fn test_mark_dropped_keeps_audit_row() {
        let (repo, _tmp) = make_repo();
        let first = repo.enqueue(item("user-1", 1)).unwrap();

        repo.mark_dropped(first.sequence, "duplicate check-in for date")
            .unwrap();

        // No longer pending, but the row survives with reason and timestamp
        assert_eq!(repo.pending_count().unwrap(), 0);

        let mut conn = get_connection(&repo.pool).unwrap();
        let row = pending_check_ins::table
            .find(first.sequence)
            .first::<PendingCheckInDB>(&mut conn)
            .unwrap();
        assert_eq!(row.status, STATUS_DROPPED);
        assert_eq!(
            row.dropped_reason.as_deref(),
            Some("duplicate check-in for date")
        );
        assert!(row.dropped_at.is_some());
    }

    #[test]
    fn test_payload_round_trips() {
        let (repo, _tmp) = make_repo();
        let original = item("user-1", 1);
        let check_in = original.check_in.clone();

        repo.enqueue(original).unwrap();
        let pending = repo.pending().unwrap();
        assert_eq!(pending[0].check_in, check_in);
        assert_eq!(pending[0].stats.user_id, "user-1");
    }
}
