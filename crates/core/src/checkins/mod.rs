//! Check-ins module - domain models, reward math, the eligibility gate, and
//! the record pipeline with offline fallback.

mod checkins_errors;
mod checkins_model;
mod checkins_service;
mod checkins_traits;
mod rewards_calculator;


pub use checkins_errors::CheckInError;
pub use checkins_model::{
    CheckInReceipt, CheckInRecord, Eligibility, NewCheckIn, RewardBreakdown, UserStats,
};
pub use checkins_service::CheckInService;
pub use checkins_traits::{CheckInServiceTrait, CheckInStoreTrait, OfflineStoreTrait};
pub use rewards_calculator::{
    apply_check_in, compute_reward, level_for_points, multiplier_for_streak,
    streak_after_check_in,
};
