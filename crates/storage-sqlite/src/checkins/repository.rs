//! Offline mirror of check-ins and user stats.

use diesel::prelude::*;

use goodcare_core::checkins::{CheckInRecord, OfflineStoreTrait, UserStats};
use goodcare_core::errors::Result;

use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::{check_ins, user_stats};

use super::model::{CheckInDB, UserStatsDB};

/// Local fallback store for check-ins.
///
/// All operations are synchronous: they run on the caller's thread against
/// the pooled SQLite connection. The record insert and the stats upsert run
/// inside one immediate transaction so a partial check-in is never
/// observable.
pub struct OfflineCheckInStore {
    pool: DbPool,
}

impl OfflineCheckInStore {
    pub fn new(pool: DbPool) -> Self {
        OfflineCheckInStore { pool }
    }
}

impl OfflineStoreTrait for OfflineCheckInStore {
    fn get_user_stats(&self, user_id: &str) -> Result<Option<UserStats>> {
        let mut conn = get_connection(&self.pool)?;
        let row = user_stats::table
            .find(user_id)
            .first::<UserStatsDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(UserStats::from))
    }

    fn store_check_in(&self, record: &CheckInRecord, stats: &UserStats) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        let record_db = CheckInDB::from(record);
        let stats_db = UserStatsDB::from(stats);

        conn.immediate_transaction::<_, StorageError, _>(|conn| {
            diesel::insert_into(check_ins::table)
                .values(&record_db)
                .execute(conn)?;
            diesel::insert_into(user_stats::table)
                .values(&stats_db)
                .on_conflict(user_stats::user_id)
                .do_update()
                .set(&stats_db)
                .execute(conn)?;
            Ok(())
        })?;
        Ok(())
    }

    fn put_user_stats(&self, stats: &UserStats) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        let stats_db = UserStatsDB::from(stats);
        diesel::insert_into(user_stats::table)
            .values(&stats_db)
            .on_conflict(user_stats::user_id)
            .do_update()
            .set(&stats_db)
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        Ok(())
    }

    fn list_check_ins(&self, user_id: &str, limit: i64) -> Result<Vec<CheckInRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = check_ins::table
            .filter(check_ins::user_id.eq(user_id))
            .order(check_ins::checked_on.desc())
            .limit(limit)
            .load::<CheckInDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(CheckInRecord::try_from).collect()
    }
}
