/// Flat points awarded for every check-in
pub const BASE_POINTS: i64 = 10;

/// Bonus points for attaching a non-empty reflection note
pub const NOTE_BONUS_POINTS: i64 = 5;

/// Maximum reflection note length in characters, unless overridden
pub const DEFAULT_NOTE_MAX_CHARS: usize = 500;

/// Rolling cooldown between two check-ins by the same user
pub const CHECK_IN_COOLDOWN_HOURS: i64 = 8;

/// Mood scale bounds (1 = most negative, 5 = most positive)
pub const MOOD_MIN: i32 = 1;
pub const MOOD_MAX: i32 = 5;

/// How long a connectivity probe result may be reused
pub const CONNECTIVITY_CACHE_SECS: u64 = 30;

/// How long the last successful leaderboard fetch may be served after a
/// failed refresh
pub const LEADERBOARD_CACHE_SECS: u64 = 300;

/// Default number of leaderboard rows returned when no limit is given
pub const DEFAULT_LEADERBOARD_LIMIT: i64 = 50;
