use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use goodcare_core::checkins::{CheckInReceipt, CheckInRecord, Eligibility, NewCheckIn, UserStats};

use crate::{error::ApiResult, main_lib::AppState};

const DEFAULT_HISTORY_LIMIT: i64 = 30;
const MAX_HISTORY_LIMIT: i64 = 100;

#[derive(Deserialize)]
struct HistoryParams {
    limit: Option<i64>,
}

async fn get_eligibility(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Eligibility>> {
    let eligibility = state.check_in_service.can_check_in(&user_id).await?;
    Ok(Json(eligibility))
}

async fn create_check_in(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(submission): Json<NewCheckIn>,
) -> ApiResult<Json<CheckInReceipt>> {
    let receipt = state
        .check_in_service
        .record_check_in(&user_id, submission)
        .await?;
    Ok(Json(receipt))
}

async fn list_check_ins(
    Path(user_id): Path<String>,
    Query(params): Query<HistoryParams>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CheckInRecord>>> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let records = state
        .check_in_service
        .list_recent_check_ins(&user_id, limit)
        .await?;
    Ok(Json(records))
}

async fn get_stats(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<UserStats>> {
    let stats = state.check_in_service.get_user_stats(&user_id).await?;
    Ok(Json(stats))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/{id}/eligibility", get(get_eligibility))
        .route(
            "/users/{id}/check-ins",
            get(list_check_ins).post(create_check_in),
        )
        .route("/users/{id}/stats", get(get_stats))
}
