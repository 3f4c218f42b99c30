use crate::app_config::AppConfig;
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
/// Decoupled from the process environment so tests can drive it with a
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

    let browserless_url = require("TAGSCOUT_BROWSERLESS_URL")?;
    let browserless_token = lookup("TAGSCOUT_BROWSERLESS_TOKEN")
        .ok()
        .filter(|t| !t.is_empty());
    let platform_base_url = or_default("TAGSCOUT_PLATFORM_BASE_URL", "https://www.tiktok.com")
        .trim_end_matches('/')
        .to_string();
    let log_level = or_default("TAGSCOUT_LOG_LEVEL", "info");

    let max_requests_per_minute = parse_u32("TAGSCOUT_MAX_REQUESTS_PER_MINUTE", "3")?;
    if max_requests_per_minute == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TAGSCOUT_MAX_REQUESTS_PER_MINUTE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let min_request_interval_secs = parse_u64("TAGSCOUT_MIN_REQUEST_INTERVAL_SECS", "15")?;
    let navigation_timeout_secs = parse_u64("TAGSCOUT_NAVIGATION_TIMEOUT_SECS", "30")?;
    let marker_timeout_secs = parse_u64("TAGSCOUT_MARKER_TIMEOUT_SECS", "10")?;
    let http_timeout_secs = parse_u64("TAGSCOUT_HTTP_TIMEOUT_SECS", "60")?;

    let run_timeout_secs = match lookup("TAGSCOUT_RUN_TIMEOUT_SECS") {
        Ok(raw) if !raw.trim().is_empty() => {
            Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidEnvVar {
                        var: "TAGSCOUT_RUN_TIMEOUT_SECS".to_string(),
                        reason: e.to_string(),
                    })?,
            )
        }
        _ => None,
    };

    Ok(AppConfig {
        browserless_url,
        browserless_token,
        platform_base_url,
        log_level,
        max_requests_per_minute,
        min_request_interval_secs,
        navigation_timeout_secs,
        marker_timeout_secs,
        http_timeout_secs,
        run_timeout_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
