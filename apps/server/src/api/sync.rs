use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use goodcare_core::sync::{SyncRunSummary, SyncStatus};

use crate::{error::ApiResult, main_lib::AppState};

/// Manual reconciliation trigger, e.g. from an admin page after an outage.
async fn run_sync(State(state): State<Arc<AppState>>) -> ApiResult<Json<SyncRunSummary>> {
    let summary = state.sync_service.run_once().await?;
    Ok(Json(summary))
}

async fn sync_status(State(state): State<Arc<AppState>>) -> ApiResult<Json<SyncStatus>> {
    let status = state.sync_service.status().await?;
    Ok(Json(status))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sync/run", post(run_sync))
        .route("/sync/status", get(sync_status))
}
