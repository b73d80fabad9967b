//! Wire types for the GOOD CARE cloud API.
//!
//! The cloud API speaks snake_case; these structs keep that shape at the
//! boundary and convert to the core domain models so storage field names
//! never leak into the core logic.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use goodcare_core::checkins::{CheckInRecord, UserStats};
use goodcare_core::leaderboard::LeaderboardRow;
use goodcare_core::users::UserProfile;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) struct ApiCheckIn {
    pub id: String,
    pub user_id: String,
    pub checked_on: NaiveDate,
    pub mood_value: i32,
    pub note: Option<String>,
    pub points_awarded: i64,
    pub streak_at_check_in: i64,
    pub multiplier_applied: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) struct ApiUserStats {
    pub user_id: String,
    pub total_points: i64,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub total_check_ins: i64,
    pub last_check_in_on: Option<NaiveDate>,
    pub last_check_in_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/v1/check-ins`: the record and the stats update the
/// server must apply as one atomic unit.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) struct ApiRecordCheckInRequest {
    pub check_in: ApiCheckIn,
    pub stats: ApiUserStats,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCheckInsResponse {
    #[serde(default)]
    pub check_ins: Vec<ApiCheckIn>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) struct ApiLeaderboardRow {
    pub user_id: String,
    pub display_name: String,
    pub total_points: i64,
    pub current_streak: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiLeaderboardResponse {
    #[serde(default)]
    pub entries: Vec<ApiLeaderboardRow>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) struct ApiUserProfile {
    pub user_id: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiHealthResponse {
    #[allow(dead_code)]
    pub status: String,
}

// Conversions to and from domain models

impl From<ApiCheckIn> for CheckInRecord {
    fn from(api: ApiCheckIn) -> Self {
        CheckInRecord {
            id: api.id,
            user_id: api.user_id,
            checked_on: api.checked_on,
            mood_value: api.mood_value,
            note: api.note,
            points_awarded: api.points_awarded,
            streak_at_check_in: api.streak_at_check_in,
            multiplier_applied: api.multiplier_applied,
            created_at: api.created_at,
        }
    }
}

impl From<&CheckInRecord> for ApiCheckIn {
    fn from(record: &CheckInRecord) -> Self {
        ApiCheckIn {
            id: record.id.clone(),
            user_id: record.user_id.clone(),
            checked_on: record.checked_on,
            mood_value: record.mood_value,
            note: record.note.clone(),
            points_awarded: record.points_awarded,
            streak_at_check_in: record.streak_at_check_in,
            multiplier_applied: record.multiplier_applied,
            created_at: record.created_at,
        }
    }
}

impl From<ApiUserStats> for UserStats {
    fn from(api: ApiUserStats) -> Self {
        UserStats {
            user_id: api.user_id,
            total_points: api.total_points,
            current_streak: api.current_streak,
            longest_streak: api.longest_streak,
            total_check_ins: api.total_check_ins,
            last_check_in_on: api.last_check_in_on,
            last_check_in_at: api.last_check_in_at,
            level: 0,
        }
        .with_recomputed_level()
    }
}

impl From<&UserStats> for ApiUserStats {
    fn from(stats: &UserStats) -> Self {
        ApiUserStats {
            user_id: stats.user_id.clone(),
            total_points: stats.total_points,
            current_streak: stats.current_streak,
            longest_streak: stats.longest_streak,
            total_check_ins: stats.total_check_ins,
            last_check_in_on: stats.last_check_in_on,
            last_check_in_at: stats.last_check_in_at,
        }
    }
}

impl From<ApiLeaderboardRow> for LeaderboardRow {
    fn from(api: ApiLeaderboardRow) -> Self {
        LeaderboardRow {
            user_id: api.user_id,
            display_name: api.display_name,
            total_points: api.total_points,
            current_streak: api.current_streak,
        }
    }
}

impl From<ApiUserProfile> for UserProfile {
    fn from(api: ApiUserProfile) -> Self {
        UserProfile {
            user_id: api.user_id,
            display_name: api.display_name,
            created_at: api.created_at,
        }
    }
}

impl From<&UserProfile> for ApiUserProfile {
    fn from(profile: &UserProfile) -> Self {
        ApiUserProfile {
            user_id: profile.user_id.clone(),
            display_name: profile.display_name.clone(),
            created_at: profile.created_at,
        }
    }
}
