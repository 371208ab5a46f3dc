use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation live here, decoupled from the process environment
/// so tests can drive it with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    // Credentials are checked by the command that needs them.
    let yelp_api_key = optional("YELP_API_KEY");
    let news_api_key = optional("NEWS_API_KEY");
    let open_data_app_token = optional("NYC_OPEN_DATA_APP_TOKEN");
    let geoclient_key = optional("NYC_GEOCLIENT_KEY");

    let env = parse_environment(&or_default("COMPS_ENV", "development"));
    let log_level = or_default("COMPS_LOG_LEVEL", "info");
    let categories_path = PathBuf::from(or_default(
        "COMPS_CATEGORIES_PATH",
        "./config/categories.yaml",
    ));

    let http_timeout_secs = parse_u64("COMPS_HTTP_TIMEOUT_SECS", "15")?;
    if http_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "COMPS_HTTP_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("COMPS_USER_AGENT", "comps/0.1 (prospect-scoring)");

    let search_radius_meters = parse_u32("COMPS_SEARCH_RADIUS_METERS", "16093")?;
    let search_limit = parse_u32("COMPS_SEARCH_LIMIT", "50")?;

    let chain_metro_location = or_default("COMPS_CHAIN_METRO_LOCATION", "New York, NY");
    let chain_radius_meters = parse_u32("COMPS_CHAIN_RADIUS_METERS", "40000")?;
    let chain_categories = or_default("COMPS_CHAIN_CATEGORIES", "restaurants,food,bars");

    let news_window_days = parse_u32("COMPS_NEWS_WINDOW_DAYS", "30")?;
    let max_concurrent_candidates = parse_usize("COMPS_MAX_CONCURRENT_CANDIDATES", "4")?.max(1);

    Ok(AppConfig {
        env,
        log_level,
        categories_path,
        yelp_api_key,
        news_api_key,
        open_data_app_token,
        geoclient_key,
        http_timeout_secs,
        user_agent,
        search_radius_meters,
        search_limit,
        chain_metro_location,
        chain_radius_meters,
        chain_categories,
        news_window_days,
        max_concurrent_candidates,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
