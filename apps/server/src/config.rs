//! Server configuration from environment variables.

use goodcare_connect::DEFAULT_CLOUD_API_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    pub cloud_api_url: String,
    pub cloud_api_token: String,
    pub static_dir: String,
    /// Seconds between reconciliation runs.
    pub sync_interval_secs: u64,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl Config {
    pub fn from_env() -> Self {
        let cloud_api_url = env_or("CARE_CLOUD_API_URL", DEFAULT_CLOUD_API_URL)
            .trim_end_matches('/')
            .to_string();
        let sync_interval_secs = env_or("CARE_SYNC_INTERVAL_SECS", "60")
            .parse()
            .unwrap_or(60);

        Config {
            listen_addr: env_or("CARE_LISTEN_ADDR", "0.0.0.0:8080"),
            db_path: env_or("CARE_DB_PATH", "./data/goodcare.db"),
            cloud_api_url,
            cloud_api_token: env_or("CARE_CLOUD_API_TOKEN", ""),
            static_dir: env_or("CARE_STATIC_DIR", "./static"),
            sync_interval_secs,
        }
    }
}
