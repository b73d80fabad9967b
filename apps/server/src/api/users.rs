use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use goodcare_core::errors::{DatabaseError, Error};
use goodcare_core::users::{NewUserProfile, UserProfile};

use crate::{error::ApiResult, main_lib::AppState};

async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(new_user): Json<NewUserProfile>,
) -> ApiResult<Json<UserProfile>> {
    let profile = state.user_service.register(new_user).await?;
    Ok(Json(profile))
}

async fn get_user(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<UserProfile>> {
    let profile = state
        .user_service
        .get_profile(&user_id)
        .await?
        .ok_or_else(|| Error::Database(DatabaseError::NotFound(user_id)))?;
    Ok(Json(profile))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", post(register_user))
        .route("/users/{id}", get(get_user))
}
