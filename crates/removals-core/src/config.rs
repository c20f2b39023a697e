use crate::app_config::{AppConfig, DistanceStrategy, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it from a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
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

    let api_base_url = require("REMOVALS_API_BASE_URL")?;
    let env = parse_environment(&or_default("REMOVALS_ENV", "development"));
    let log_level = or_default("REMOVALS_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("REMOVALS_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("REMOVALS_USER_AGENT", "removals/0.1 (booking-wizard)");
    let max_retries = parse_u32("REMOVALS_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("REMOVALS_RETRY_BACKOFF_BASE_MS", "250")?;
    let autocomplete_debounce_ms = parse_u64("REMOVALS_AUTOCOMPLETE_DEBOUNCE_MS", "500")?;
    let selection_suppress_ms = parse_u64("REMOVALS_SELECTION_SUPPRESS_MS", "100")?;

    let strategy_raw = or_default("REMOVALS_DISTANCE_STRATEGY", "matrix");
    let distance_strategy =
        parse_distance_strategy(&strategy_raw).ok_or_else(|| ConfigError::InvalidEnvVar {
            var: "REMOVALS_DISTANCE_STRATEGY".to_string(),
            reason: format!("expected \"matrix\" or \"directions\", got \"{strategy_raw}\""),
        })?;

    Ok(AppConfig {
        api_base_url,
        env,
        log_level,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        autocomplete_debounce_ms,
        selection_suppress_ms,
        distance_strategy,
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

fn parse_distance_strategy(s: &str) -> Option<DistanceStrategy> {
    match s.trim().to_ascii_lowercase().as_str() {
        "matrix" => Some(DistanceStrategy::Matrix),
        "directions" => Some(DistanceStrategy::Directions),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
