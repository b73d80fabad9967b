use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use goodcare_core::constants::DEFAULT_LEADERBOARD_LIMIT;
use goodcare_core::leaderboard::LeaderboardEntry;

use crate::{error::ApiResult, main_lib::AppState};

const MAX_LEADERBOARD_LIMIT: i64 = 100;

#[derive(Deserialize)]
struct LeaderboardParams {
    limit: Option<i64>,
}

async fn get_leaderboard(
    Query(params): Query<LeaderboardParams>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<LeaderboardEntry>>> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .clamp(1, MAX_LEADERBOARD_LIMIT);
    let entries = state.leaderboard_service.get_leaderboard(limit).await?;
    Ok(Json(entries))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/leaderboard", get(get_leaderboard))
}
