use crate::errors::Result;
use async_trait::async_trait;

use super::users_model::UserProfile;

/// Trait for the remote user store.
///
/// Creating a profile also creates the user's zeroed stats row on the remote
/// side, in the same operation.
#[async_trait]
pub trait UserStoreTrait: Send + Sync {
    async fn create_user(&self, profile: &UserProfile) -> Result<UserProfile>;
    async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>>;
}

/// Trait for user service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, new_user: super::users_model::NewUserProfile) -> Result<UserProfile>;
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>>;
}
