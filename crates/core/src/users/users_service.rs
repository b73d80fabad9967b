use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use uuid::Uuid;

use crate::errors::{Result, ValidationError};

use super::users_model::{NewUserProfile, UserProfile};
use super::users_traits::{UserServiceTrait, UserStoreTrait};

/// Maximum display name length in characters.
const DISPLAY_NAME_MAX_CHARS: usize = 64;

/// User registration and profile reads.
///
/// Registration is remote-only: identities are never minted while the cloud
/// store is unreachable, so there is no offline fallback here.
pub struct UserService {
    store: Arc<dyn UserStoreTrait>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStoreTrait>) -> Self {
        UserService { store }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, new_user: NewUserProfile) -> Result<UserProfile> {
        let display_name = new_user.display_name.trim();
        if display_name.is_empty() {
            return Err(ValidationError::MissingField("displayName".to_string()).into());
        }
        if display_name.chars().count() > DISPLAY_NAME_MAX_CHARS {
            return Err(ValidationError::InvalidInput(format!(
                "Display name exceeds {} characters",
                DISPLAY_NAME_MAX_CHARS
            ))
            .into());
        }

        let profile = UserProfile {
            user_id: new_user
                .user_id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            display_name: display_name.to_string(),
            created_at: Utc::now(),
        };
        debug!("Registering user {}", profile.user_id);
        self.store.create_user(&profile).await
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        self.store.get_user(user_id).await
    }
}
