//! Pure streak and reward arithmetic.
//!
//! Everything in this module is side-effect free and fully unit-testable
//! without a store. Eligibility and persistence live in the service layer.

use chrono::{DateTime, NaiveDate, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::{BASE_POINTS, NOTE_BONUS_POINTS};
use crate::errors::{Error, Result};

use super::checkins_errors::CheckInError;
use super::checkins_model::{RewardBreakdown, UserStats};

/// Streak thresholds and their multipliers, highest tier first.
/// Thresholds are inclusive; the highest qualifying tier wins.
const MULTIPLIER_TIERS: [(i64, Decimal); 3] = [(14, dec!(2.0)), (7, dec!(1.5)), (3, dec!(1.25))];

/// Streak count after a check-in on `today`.
///
/// A consecutive calendar day extends the streak, a gap of more than one day
/// resets it to 1, and no prior check-in starts at 1. `today` equal to (or
/// before) the previous check-in date is an invariant violation: the
/// eligibility gate should have blocked the attempt, so it is rejected
/// rather than silently ignored.
pub fn streak_after_check_in(previous: Option<&UserStats>, today: NaiveDate) -> Result<i64> {
    let stats = match previous {
        Some(stats) => stats,
        None => return Ok(1),
    };
    let last_on = match stats.last_check_in_on {
        Some(date) => date,
        None => return Ok(1),
    };

    let gap_days = (today - last_on).num_days();
    if gap_days <= 0 {
        return Err(CheckInError::DuplicateForDate(today).into());
    }
    if gap_days == 1 {
        Ok(stats.current_streak + 1)
    } else {
        Ok(1)
    }
}

/// Multiplier for a streak value.
pub fn multiplier_for_streak(streak: i64) -> Decimal {
    for (threshold, multiplier) in MULTIPLIER_TIERS {
        if streak >= threshold {
            return multiplier;
        }
    }
    Decimal::ONE
}

/// Level derived from a lifetime point total.
///
/// Fixed bands up to 1500 points, then one level per 300 points.
pub fn level_for_points(total_points: i64) -> i64 {
    match total_points {
        p if p < 100 => 1,
        p if p < 300 => 2,
        p if p < 600 => 3,
        p if p < 1000 => 4,
        p if p < 1500 => 5,
        p => p / 300 + 1,
    }
}

/// Full reward breakdown for a check-in on `today`.
///
/// `total = floor((base + bonus) * multiplier)`, the multiplicative scheme.
pub fn compute_reward(
    previous: Option<&UserStats>,
    today: NaiveDate,
    has_note: bool,
) -> Result<RewardBreakdown> {
    let new_streak = streak_after_check_in(previous, today)?;
    let multiplier = multiplier_for_streak(new_streak);
    let base_points = BASE_POINTS;
    let bonus_points = if has_note { NOTE_BONUS_POINTS } else { 0 };

    let raw = Decimal::from(base_points + bonus_points) * multiplier;
    let total_points = raw
        .floor()
        .to_i64()
        .ok_or_else(|| Error::Unexpected(format!("Point total {} out of range", raw)))?;

    Ok(RewardBreakdown {
        new_streak,
        multiplier,
        base_points,
        bonus_points,
        total_points,
    })
}

/// Fold a computed check-in into the aggregate stats row.
pub fn apply_check_in(
    previous: Option<&UserStats>,
    user_id: &str,
    reward: &RewardBreakdown,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> UserStats {
    let mut stats = previous
        .cloned()
        .unwrap_or_else(|| UserStats::new(user_id));
    stats.total_points += reward.total_points;
    stats.current_streak = reward.new_streak;
    stats.longest_streak = stats.longest_streak.max(reward.new_streak);
    stats.total_check_ins += 1;
    stats.last_check_in_on = Some(today);
    stats.last_check_in_at = Some(now);
    stats.level = level_for_points(stats.total_points);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stats_with(current_streak: i64, last_check_in_on: Option<NaiveDate>) -> UserStats {
        UserStats {
            current_streak,
            last_check_in_on,
            last_check_in_at: last_check_in_on
                .map(|d| DateTime::from_naive_utc_and_offset(d.and_hms_opt(9, 0, 0).unwrap(), Utc)),
            ..UserStats::new("user-1")
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_check_in_starts_streak() {
        assert_eq!(streak_after_check_in(None, date(2026, 3, 1)).unwrap(), 1);

        // A stats row without any recorded check-in behaves the same
        let fresh = UserStats::new("user-1");
        assert_eq!(
            streak_after_check_in(Some(&fresh), date(2026, 3, 1)).unwrap(),
            1
        );
    }

    #[test]
    fn test_consecutive_day_extends_streak() {
        let stats = stats_with(4, Some(date(2026, 3, 1)));
        assert_eq!(
            streak_after_check_in(Some(&stats), date(2026, 3, 2)).unwrap(),
            5
        );
    }

    #[test]
    fn test_gap_resets_streak() {
        let stats = stats_with(9, Some(date(2026, 3, 1)));
        assert_eq!(
            streak_after_check_in(Some(&stats), date(2026, 3, 3)).unwrap(),
            1
        );
        assert_eq!(
            streak_after_check_in(Some(&stats), date(2026, 4, 1)).unwrap(),
            1
        );
    }

    #[test]
    fn test_same_day_is_invariant_violation() {
        let stats = stats_with(3, Some(date(2026, 3, 1)));
        let err = streak_after_check_in(Some(&stats), date(2026, 3, 1)).unwrap_err();
        assert!(matches!(
            err,
            Error::CheckIn(CheckInError::DuplicateForDate(_))
        ));

        // Clock skew putting the last check-in in the future is rejected too
        let err = streak_after_check_in(Some(&stats), date(2026, 2, 28)).unwrap_err();
        assert!(matches!(
            err,
            Error::CheckIn(CheckInError::DuplicateForDate(_))
        ));
    }

    #[test]
    fn test_multiplier_tiers() {
        let cases = [
            (1, dec!(1.0)),
            (2, dec!(1.0)),
            (3, dec!(1.25)),
            (6, dec!(1.25)),
            (7, dec!(1.5)),
            (13, dec!(1.5)),
            (14, dec!(2.0)),
            (20, dec!(2.0)),
        ];
        for (streak, expected) in cases {
            assert_eq!(multiplier_for_streak(streak), expected, "streak {}", streak);
        }
    }

    #[test]
    fn test_points_with_note_at_streak_seven() {
        // Day 7 of a streak with a note: floor((10 + 5) * 1.5) = 22
        let stats = stats_with(6, Some(date(2026, 3, 6)));
        let reward = compute_reward(Some(&stats), date(2026, 3, 7), true).unwrap();
        assert_eq!(reward.new_streak, 7);
        assert_eq!(reward.base_points, 10);
        assert_eq!(reward.bonus_points, 5);
        assert_eq!(reward.multiplier, dec!(1.5));
        assert_eq!(reward.total_points, 22);
    }

    #[test]
    fn test_points_without_note() {
        let reward = compute_reward(None, date(2026, 3, 1), false).unwrap();
        assert_eq!(reward.new_streak, 1);
        assert_eq!(reward.bonus_points, 0);
        assert_eq!(reward.total_points, 10);
    }

    #[test]
    fn test_points_are_deterministic() {
        let stats = stats_with(6, Some(date(2026, 3, 6)));
        let a = compute_reward(Some(&stats), date(2026, 3, 7), true).unwrap();
        let b = compute_reward(Some(&stats), date(2026, 3, 7), true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_level_thresholds() {
        let cases = [
            (0, 1),
            (99, 1),
            (100, 2),
            (299, 2),
            (300, 3),
            (1499, 5),
            (1500, 6),
            (1800, 7),
        ];
        for (points, expected) in cases {
            assert_eq!(level_for_points(points), expected, "points {}", points);
        }
    }

    #[test]
    fn test_apply_check_in_updates_aggregates() {
        let stats = UserStats {
            total_points: 95,
            current_streak: 2,
            longest_streak: 8,
            total_check_ins: 12,
            ..stats_with(2, Some(date(2026, 3, 6)))
        };
        let reward = compute_reward(Some(&stats), date(2026, 3, 7), true).unwrap();
        let now = Utc::now();
        let updated = apply_check_in(Some(&stats), "user-1", &reward, date(2026, 3, 7), now);

        assert_eq!(reward.new_streak, 3);
        assert_eq!(updated.total_points, 95 + reward.total_points);
        assert_eq!(updated.current_streak, 3);
        // longest streak never regresses
        assert_eq!(updated.longest_streak, 8);
        assert_eq!(updated.total_check_ins, 13);
        assert_eq!(updated.last_check_in_on, Some(date(2026, 3, 7)));
        assert_eq!(updated.last_check_in_at, Some(now));
        // 95 + 18 = 113 points puts the user at level 2
        assert_eq!(updated.level, 2);
    }

    #[test]
    fn test_apply_check_in_first_ever() {
        let reward = compute_reward(None, date(2026, 3, 1), false).unwrap();
        let updated = apply_check_in(None, "user-9", &reward, date(2026, 3, 1), Utc::now());
        assert_eq!(updated.user_id, "user-9");
        assert_eq!(updated.total_points, 10);
        assert_eq!(updated.current_streak, 1);
        assert_eq!(updated.longest_streak, 1);
        assert_eq!(updated.total_check_ins, 1);
    }

    proptest! {
        #[test]
        fn multiplier_is_monotonic(streak in 1i64..1000) {
            prop_assert!(multiplier_for_streak(streak + 1) >= multiplier_for_streak(streak));
        }

        #[test]
        fn total_points_bounded_by_multiplier_range(streak in 1i64..1000, has_note: bool) {
            let stats = UserStats {
                current_streak: streak - 1,
                last_check_in_on: NaiveDate::from_ymd_opt(2026, 3, 6),
                ..UserStats::new("user-1")
            };
            let previous = if streak > 1 { Some(&stats) } else { None };
            let today = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
            let reward = compute_reward(previous, today, has_note).unwrap();
            let floor = reward.base_points + reward.bonus_points;
            prop_assert!(reward.total_points >= floor);
            prop_assert!(reward.total_points <= floor * 2);
        }

        #[test]
        fn level_is_monotonic(points in 0i64..100_000) {
            prop_assert!(level_for_points(points + 1) >= level_for_points(points));
        }
    }
}
