//! REST API routers.

pub mod checkins;
pub mod health;
pub mod leaderboard;
pub mod sync;
pub mod users;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(checkins::router())
        .merge(leaderboard::router())
        .merge(users::router())
        .merge(sync::router())
        .merge(health::router());

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
