use rust_decimal::Decimal;
use thiserror::Error;

use crate::app_config::AppConfig;
use crate::policy::RenotifyPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any `PRICEWATCH_*` value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if any `PRICEWATCH_*` value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup.
///
/// The parsing/validation core, decoupled from the real environment so tests
/// can drive it with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = AppConfig::default();

    let or_default =
        |var: &str, default: String| -> String { lookup(var).unwrap_or(default) };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_owned(),
        reason,
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        or_default(var, default.to_string())
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: usize| -> Result<usize, ConfigError> {
        or_default(var, default.to_string())
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_i64 = |var: &str, default: i64| -> Result<i64, ConfigError> {
        or_default(var, default.to_string())
            .parse::<i64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match or_default(var, default.to_string()).as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(invalid(var, format!("expected true/false, got \"{other}\""))),
        }
    };

    let parse_decimal = |var: &str, default: Decimal| -> Result<Decimal, ConfigError> {
        or_default(var, default.to_string())
            .parse::<Decimal>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("PRICEWATCH_LOG_LEVEL", defaults.log_level.clone());

    let static_timeout_secs =
        parse_u64("PRICEWATCH_STATIC_TIMEOUT_SECS", defaults.static_timeout_secs)?;
    let static_max_redirects = parse_usize(
        "PRICEWATCH_STATIC_MAX_REDIRECTS",
        defaults.static_max_redirects,
    )?;

    let browser_enabled = parse_bool("PRICEWATCH_BROWSER_ENABLED", defaults.browser_enabled)?;
    let browser_nav_timeout_secs = parse_u64(
        "PRICEWATCH_BROWSER_NAV_TIMEOUT_SECS",
        defaults.browser_nav_timeout_secs,
    )?;
    let browser_settle_ms =
        parse_u64("PRICEWATCH_BROWSER_SETTLE_MS", defaults.browser_settle_ms)?;

    let fetch_cooldown_ms = parse_u64("PRICEWATCH_FETCH_COOLDOWN_MS", defaults.fetch_cooldown_ms)?;
    let rate_limit_interval_secs = parse_u64(
        "PRICEWATCH_RATE_LIMIT_INTERVAL_SECS",
        defaults.rate_limit_interval_secs,
    )?;

    let change_min_delta =
        parse_decimal("PRICEWATCH_CHANGE_MIN_DELTA", defaults.change_min_delta)?;
    let change_heartbeat_hours = parse_i64(
        "PRICEWATCH_CHANGE_HEARTBEAT_HOURS",
        defaults.change_heartbeat_hours,
    )?;

    let renotify = parse_renotify(&or_default(
        "PRICEWATCH_RENOTIFY_POLICY",
        "once".to_owned(),
    ))?;
    let reject_private_hosts = parse_bool(
        "PRICEWATCH_REJECT_PRIVATE_HOSTS",
        defaults.reject_private_hosts,
    )?;

    Ok(AppConfig {
        log_level,
        static_timeout_secs,
        static_max_redirects,
        browser_enabled,
        browser_nav_timeout_secs,
        browser_settle_ms,
        fetch_cooldown_ms,
        rate_limit_interval_secs,
        change_min_delta,
        change_heartbeat_hours,
        renotify,
        reject_private_hosts,
    })
}

fn parse_renotify(s: &str) -> Result<RenotifyPolicy, ConfigError> {
    match s {
        "once" => Ok(RenotifyPolicy::Once),
        "every-trigger" => Ok(RenotifyPolicy::EveryTrigger),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PRICEWATCH_RENOTIFY_POLICY".to_owned(),
            reason: format!("expected \"once\" or \"every-trigger\", got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
