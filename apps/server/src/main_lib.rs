use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use goodcare_connect::{CareApiClient, RemoteCareStore};
use goodcare_core::checkins::{CheckInService, CheckInServiceTrait};
use goodcare_core::leaderboard::{LeaderboardService, LeaderboardServiceTrait};
use goodcare_core::sync::{ConnectivityMonitor, SyncService, SyncServiceTrait};
use goodcare_core::users::{UserService, UserServiceTrait};
use goodcare_storage_sqlite::checkins::OfflineCheckInStore;
use goodcare_storage_sqlite::db;
use goodcare_storage_sqlite::queue::SyncQueueRepository;

use crate::config::Config;

pub struct AppState {
    pub check_in_service: Arc<dyn CheckInServiceTrait + Send + Sync>,
    pub leaderboard_service: Arc<dyn LeaderboardServiceTrait + Send + Sync>,
    pub sync_service: Arc<dyn SyncServiceTrait + Send + Sync>,
    pub user_service: Arc<dyn UserServiceTrait + Send + Sync>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("CARE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    // The cloud store is the primary backend for every remote-facing trait;
    // the SQLite pool backs the offline mirror and the pending queue.
    let client = CareApiClient::new(&config.cloud_api_url, &config.cloud_api_token)?;
    let remote = Arc::new(RemoteCareStore::new(client));
    let offline = Arc::new(OfflineCheckInStore::new(pool.clone()));
    let queue = Arc::new(SyncQueueRepository::new(pool));
    let connectivity = Arc::new(ConnectivityMonitor::new(remote.clone()));

    let check_in_service = Arc::new(CheckInService::new(
        remote.clone(),
        offline,
        queue.clone(),
        connectivity.clone(),
    ));
    let leaderboard_service = Arc::new(LeaderboardService::new(remote.clone()));
    let sync_service = Arc::new(SyncService::new(remote.clone(), queue, connectivity));
    let user_service = Arc::new(UserService::new(remote));

    Ok(Arc::new(AppState {
        check_in_service,
        leaderboard_service,
        sync_service,
        user_service,
        db_path,
    }))
}
