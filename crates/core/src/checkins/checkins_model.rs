//! Check-in domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rewards_calculator::level_for_points;

/// A single daily mood check-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRecord {
    pub id: String,
    pub user_id: String,
    /// Calendar date of the check-in (UTC day boundary).
    pub checked_on: NaiveDate,
    /// Mood on the 1-5 scale, 1 = most negative.
    pub mood_value: i32,
    pub note: Option<String>,
    /// Final point value for this check-in, after the streak multiplier.
    pub points_awarded: i64,
    /// Consecutive-day streak after this check-in was applied.
    pub streak_at_check_in: i64,
    pub multiplier_applied: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Aggregate stats row, one per user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub user_id: String,
    pub total_points: i64,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub total_check_ins: i64,
    pub last_check_in_on: Option<NaiveDate>,
    pub last_check_in_at: Option<DateTime<Utc>>,
    /// Derived from `total_points`; recomputed on every load, never read
    /// back from storage as authoritative.
    pub level: i64,
}

impl UserStats {
    /// Zeroed stats row, as created at user registration.
    pub fn new(user_id: impl Into<String>) -> Self {
        UserStats {
            user_id: user_id.into(),
            total_points: 0,
            current_streak: 0,
            longest_streak: 0,
            total_check_ins: 0,
            last_check_in_on: None,
            last_check_in_at: None,
            level: level_for_points(0),
        }
    }

    /// Recompute the derived level from the point total.
    pub fn with_recomputed_level(mut self) -> Self {
        self.level = level_for_points(self.total_points);
        self
    }
}

/// A check-in submission from the UI layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCheckIn {
    pub mood_value: i32,
    #[serde(default)]
    pub note: Option<String>,
}

impl NewCheckIn {
    /// The note, if it has visible content. Whitespace-only notes do not
    /// count towards the note bonus.
    pub fn trimmed_note(&self) -> Option<&str> {
        self.note
            .as_deref()
            .map(str::trim)
            .filter(|note| !note.is_empty())
    }
}

/// Outcome of the eligibility gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_eligible_at: Option<DateTime<Utc>>,
}

impl Eligibility {
    pub fn allowed() -> Self {
        Eligibility {
            allowed: true,
            next_eligible_at: None,
        }
    }

    pub fn denied_until(next_eligible_at: DateTime<Utc>) -> Self {
        Eligibility {
            allowed: false,
            next_eligible_at: Some(next_eligible_at),
        }
    }
}

/// Point composition for one check-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RewardBreakdown {
    pub new_streak: i64,
    pub multiplier: Decimal,
    pub base_points: i64,
    pub bonus_points: i64,
    pub total_points: i64,
}

/// What `record_check_in` hands back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInReceipt {
    pub check_in: CheckInRecord,
    pub stats: UserStats,
    /// True when the write landed in the offline store and is queued for
    /// reconciliation. Not an error: the check-in is locally durable.
    pub is_offline: bool,
}
