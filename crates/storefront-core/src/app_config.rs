use std::net::SocketAddr;

use crate::features::FilterFeatures;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Public origin used for absolute links in Open Graph tags, without a
    /// trailing slash.
    pub site_url: String,
    pub catalog_base_url: String,
    pub catalog_timeout_secs: u64,
    pub catalog_user_agent: String,
    pub catalog_max_retries: u32,
    pub catalog_retry_backoff_base_ms: u64,
    pub cache_ttl_secs: u64,
    /// Six-field cron expression (seconds first) for the cache warm-up job.
    pub cache_refresh_cron: String,
    pub og_images_enabled: bool,
    pub filters: FilterFeatures,
}
