use tower_http::services::{ServeDir, ServeFile};

use goodcare_server::api::app_router;
use goodcare_server::config::Config;
use goodcare_server::scheduler;
use goodcare_server::{build_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    init_tracing();
    let state = build_state(&config).await?;

    // Replay queued offline check-ins whenever connectivity is back
    scheduler::start_sync_scheduler(state.clone(), config.sync_interval_secs);

    let static_dir = std::path::PathBuf::from(&config.static_dir);
    let index_file = static_dir.join("index.html");
    let static_service = ServeDir::new(static_dir).fallback(ServeFile::new(index_file));
    let router = app_router(state).fallback_service(static_service);

    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
