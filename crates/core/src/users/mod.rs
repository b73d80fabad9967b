//! Users module - registration and profiles.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::{NewUserProfile, UserProfile};
pub use users_service::UserService;
pub use users_traits::{UserServiceTrait, UserStoreTrait};
