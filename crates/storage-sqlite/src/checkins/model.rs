//! Database models for check-ins and user stats.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use goodcare_core::checkins::{CheckInRecord, UserStats};
use goodcare_core::errors::{Error, ValidationError};

/// Database model for check-ins
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::check_ins)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CheckInDB {
    pub id: String,
    pub user_id: String,
    pub checked_on: NaiveDate,
    pub mood_value: i32,
    pub note: Option<String>,
    pub points_awarded: i64,
    pub streak_at_check_in: i64,
    pub multiplier_applied: String,
    pub created_at: NaiveDateTime,
}

/// Database model for the per-user stats row
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::user_stats)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct UserStatsDB {
    pub user_id: String,
    pub total_points: i64,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub total_check_ins: i64,
    pub last_check_in_on: Option<NaiveDate>,
    pub last_check_in_at: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

// Conversion to and from domain models

impl From<&CheckInRecord> for CheckInDB {
    fn from(record: &CheckInRecord) -> Self {
        CheckInDB {
            id: record.id.clone(),
            user_id: record.user_id.clone(),
            checked_on: record.checked_on,
            mood_value: record.mood_value,
            note: record.note.clone(),
            points_awarded: record.points_awarded,
            streak_at_check_in: record.streak_at_check_in,
            multiplier_applied: record.multiplier_applied.to_string(),
            created_at: record.created_at.naive_utc(),
        }
    }
}

impl TryFrom<CheckInDB> for CheckInRecord {
    type Error = Error;

    fn try_from(db: CheckInDB) -> Result<Self, Error> {
        let multiplier_applied = Decimal::from_str(&db.multiplier_applied)
            .map_err(|e| Error::Validation(ValidationError::DecimalParse(e)))?;
        Ok(CheckInRecord {
            id: db.id,
            user_id: db.user_id,
            checked_on: db.checked_on,
            mood_value: db.mood_value,
            note: db.note,
            points_awarded: db.points_awarded,
            streak_at_check_in: db.streak_at_check_in,
            multiplier_applied,
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
        })
    }
}

impl From<&UserStats> for UserStatsDB {
    fn from(stats: &UserStats) -> Self {
        UserStatsDB {
            user_id: stats.user_id.clone(),
            total_points: stats.total_points,
            current_streak: stats.current_streak,
            longest_streak: stats.longest_streak,
            total_check_ins: stats.total_check_ins,
            last_check_in_on: stats.last_check_in_on,
            last_check_in_at: stats.last_check_in_at.map(|at| at.naive_utc()),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl From<UserStatsDB> for UserStats {
    fn from(db: UserStatsDB) -> Self {
        UserStats {
            user_id: db.user_id,
            total_points: db.total_points,
            current_streak: db.current_streak,
            longest_streak: db.longest_streak,
            total_check_ins: db.total_check_ins,
            last_check_in_on: db.last_check_in_on,
            last_check_in_at: db
                .last_check_in_at
                .map(|at| DateTime::from_naive_utc_and_offset(at, Utc)),
            level: 0,
        }
        .with_recomputed_level()
    }
}
