//! User profile domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public profile, as shown on the leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// Input model for registering a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserProfile {
    /// Caller-provided id (e.g. from the identity provider); generated when
    /// absent.
    #[serde(default)]
    pub user_id: Option<String>,
    pub display_name: String,
}
