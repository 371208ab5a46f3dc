use std::path::PathBuf;

use crate::ConfigError;

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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub categories_path: PathBuf,
    pub yelp_api_key: Option<String>,
    pub news_api_key: Option<String>,
    pub open_data_app_token: Option<String>,
    pub geoclient_key: Option<String>,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub search_radius_meters: u32,
    pub search_limit: u32,
    pub chain_metro_location: String,
    pub chain_radius_meters: u32,
    pub chain_categories: String,
    pub news_window_days: u32,
    pub max_concurrent_candidates: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("categories_path", &self.categories_path)
            .field(
                "yelp_api_key",
                &self.yelp_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "news_api_key",
                &self.news_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "open_data_app_token",
                &self.open_data_app_token.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "geoclient_key",
                &self.geoclient_key.as_ref().map(|_| "[redacted]"),
            )
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("search_radius_meters", &self.search_radius_meters)
            .field("search_limit", &self.search_limit)
            .field("chain_metro_location", &self.chain_metro_location)
            .field("chain_radius_meters", &self.chain_radius_meters)
            .field("chain_categories", &self.chain_categories)
            .field("news_window_days", &self.news_window_days)
            .field(
                "max_concurrent_candidates",
                &self.max_concurrent_candidates,
            )
            .finish()
    }
}

impl AppConfig {
    /// Directory API key, required for prospect ranking.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if `YELP_API_KEY` is unset or blank.
    pub fn require_yelp_api_key(&self) -> Result<&str, ConfigError> {
        required(self.yelp_api_key.as_deref(), "YELP_API_KEY")
    }

    /// News API key, required for prospect ranking.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if `NEWS_API_KEY` is unset or blank.
    pub fn require_news_api_key(&self) -> Result<&str, ConfigError> {
        required(self.news_api_key.as_deref(), "NEWS_API_KEY")
    }

    /// GeoClient subscription key, required for address lookups.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if `NYC_GEOCLIENT_KEY` is unset or blank.
    pub fn require_geoclient_key(&self) -> Result<&str, ConfigError> {
        required(self.geoclient_key.as_deref(), "NYC_GEOCLIENT_KEY")
    }
}

fn required<'a>(value: Option<&'a str>, var: &str) -> Result<&'a str, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}
