use crate::app_config::{AppConfig, ClearPolicy};
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
/// Decoupled from the process environment so tests can pass a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(raw)
    };

    let base_url = require("BOXSYNC_BASE_URL")?;
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "BOXSYNC_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{base_url}\""),
        });
    }

    let boxes_path = or_default("BOXSYNC_BOXES_PATH", "/admin/commerce/order/boxes/");
    let edition_control_id = non_empty("BOXSYNC_EDITION_CONTROL_ID", "id_edition")?;
    let box_control_id = non_empty("BOXSYNC_BOX_CONTROL_ID", "id_box")?;
    let request_timeout_secs = parse_u64("BOXSYNC_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BOXSYNC_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("BOXSYNC_USER_AGENT", "boxsync/0.1 (order-form)");
    let clear_policy = parse_clear_policy(&or_default("BOXSYNC_CLEAR_POLICY", "retain"))?;
    let log_level = or_default("BOXSYNC_LOG_LEVEL", "info");

    Ok(AppConfig {
        base_url,
        boxes_path,
        edition_control_id,
        box_control_id,
        request_timeout_secs,
        user_agent,
        clear_policy,
        log_level,
    })
}

/// Parse a string into a `ClearPolicy` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `retain` or `eager`.
fn parse_clear_policy(s: &str) -> Result<ClearPolicy, ConfigError> {
    match s {
        "retain" => Ok(ClearPolicy::Retain),
        "eager" => Ok(ClearPolicy::Eager),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BOXSYNC_CLEAR_POLICY".to_string(),
            reason: format!("expected one of retain|eager, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
