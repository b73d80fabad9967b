//! Database models for the pending-sync queue.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use goodcare_core::checkins::{CheckInRecord, UserStats};
use goodcare_core::errors::Error;
use goodcare_core::sync::PendingCheckIn;

/// Queue row status: waiting for replay.
pub const STATUS_PENDING: &str = "pending";
/// Queue row status: taken out of the pending set, kept as audit trail.
pub const STATUS_DROPPED: &str = "dropped";

/// Database model for queued offline check-ins
#[derive(Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::pending_check_ins)]
#[diesel(primary_key(sequence))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PendingCheckInDB {
    pub sequence: i64,
    pub user_id: String,
    pub payload_json: String,
    pub status: String,
    pub enqueued_at: NaiveDateTime,
    pub dropped_at: Option<NaiveDateTime>,
    pub dropped_reason: Option<String>,
}

/// Database model for enqueueing (the sequence is assigned by SQLite)
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::pending_check_ins)]
pub struct NewPendingCheckInDB {
    pub user_id: String,
    pub payload_json: String,
    pub status: String,
    pub enqueued_at: NaiveDateTime,
}

/// JSON payload of a queue row: the record plus the stats snapshot the
/// remote store must apply on replay.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PendingPayload {
    pub check_in: CheckInRecord,
    pub stats: UserStats,
}

impl TryFrom<PendingCheckInDB> for PendingCheckIn {
    type Error = Error;

    fn try_from(db: PendingCheckInDB) -> Result<Self, Error> {
        let payload: PendingPayload = serde_json::from_str(&db.payload_json)?;
        Ok(PendingCheckIn {
            sequence: db.sequence,
            user_id: db.user_id,
            check_in: payload.check_in,
            stats: payload.stats,
            enqueued_at: DateTime::from_naive_utc_and_offset(db.enqueued_at, Utc),
        })
    }
}
