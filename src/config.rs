//! Build-time Configuration
//!
//! The backend base URL and log level are baked in when the bundle is
//! compiled (`API_URL=https://... trunk build`).

use log::LevelFilter;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the REST API, without trailing slash
    pub api_url: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Configuration captured from the compile-time environment
    pub fn load() -> Self {
        Self::from_values(option_env!("API_URL"), option_env!("LOG_LEVEL"))
    }

    pub fn from_values(api_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();
        let log_level = log_level
            .and_then(|level| level.trim().parse().ok())
            .unwrap_or(LevelFilter::Info);
        Self { api_url, log_level }
    }
}
