//! Check-in specific errors.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckInError {
    /// The eligibility gate denied the attempt; informational for the user,
    /// recoverable by waiting.
    #[error("Already checked in, next eligible at {next_eligible_at}")]
    AlreadyCheckedIn { next_eligible_at: DateTime<Utc> },

    /// A check-in already exists for the calendar date. Raised when the
    /// storage-layer uniqueness constraint fires, or when the calculator is
    /// handed stats whose last check-in is not strictly in the past (the
    /// gate must have let a duplicate through).
    #[error("A check-in already exists for {0}")]
    DuplicateForDate(NaiveDate),

    #[error("Mood value {0} is out of range (1-5)")]
    MoodOutOfRange(i32),

    #[error("Note is {actual} characters long, the limit is {max}")]
    NoteTooLong { max: usize, actual: usize },
}
