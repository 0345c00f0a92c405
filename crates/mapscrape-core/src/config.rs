use crate::app_config::{AppConfig, ExportFormat, WaitMode};
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
/// Every setting has a default, so an empty environment yields a usable
/// config with fixed-wait timings.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        or_default(var, default)
            .parse::<i64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let webdriver_url = or_default("MAPSCRAPE_WEBDRIVER_URL", "http://localhost:4444");
    let headless = parse_bool("MAPSCRAPE_HEADLESS", &or_default("MAPSCRAPE_HEADLESS", "true"))?;
    let maps_url = or_default("MAPSCRAPE_MAPS_URL", "https://www.google.com/maps");
    let output_dir = PathBuf::from(or_default("MAPSCRAPE_OUTPUT_DIR", "output"));
    let input_file = PathBuf::from(or_default("MAPSCRAPE_INPUT_FILE", "input.txt"));
    let export_format = or_default("MAPSCRAPE_EXPORT_FORMAT", "csv")
        .parse::<ExportFormat>()
        .map_err(|reason| invalid("MAPSCRAPE_EXPORT_FORMAT", reason))?;
    let log_level = or_default("MAPSCRAPE_LOG_LEVEL", "info");

    let navigation_timeout_secs = parse_u64("MAPSCRAPE_NAVIGATION_TIMEOUT_SECS", "30")?;
    let results_timeout_secs = parse_u64("MAPSCRAPE_RESULTS_TIMEOUT_SECS", "30")?;
    let settle_after_navigation_ms = parse_u64("MAPSCRAPE_SETTLE_AFTER_NAVIGATION_MS", "3000")?;
    let settle_after_typing_ms = parse_u64("MAPSCRAPE_SETTLE_AFTER_TYPING_MS", "2000")?;
    let scroll_pause_ms = parse_u64("MAPSCRAPE_SCROLL_PAUSE_MS", "2000")?;
    let detail_pause_ms = parse_u64("MAPSCRAPE_DETAIL_PAUSE_MS", "3000")?;
    let scroll_delta = parse_i64("MAPSCRAPE_SCROLL_DELTA", "10000")?;

    let stall_limit = parse_u32("MAPSCRAPE_STALL_LIMIT", "10")?;
    if stall_limit == 0 {
        return Err(invalid(
            "MAPSCRAPE_STALL_LIMIT",
            "must be at least 1".to_string(),
        ));
    }

    let wait_mode = or_default("MAPSCRAPE_WAIT_MODE", "fixed")
        .parse::<WaitMode>()
        .map_err(|reason| invalid("MAPSCRAPE_WAIT_MODE", reason))?;

    Ok(AppConfig {
        webdriver_url,
        headless,
        maps_url,
        output_dir,
        input_file,
        export_format,
        log_level,
        navigation_timeout_secs,
        results_timeout_secs,
        settle_after_navigation_ms,
        settle_after_typing_ms,
        scroll_pause_ms,
        detail_pause_ms,
        scroll_delta,
        stall_limit,
        wait_mode,
    })
}

/// Parse a boolean flag. Accepts `true/false`, `1/0`, `yes/no` (any case).
fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
