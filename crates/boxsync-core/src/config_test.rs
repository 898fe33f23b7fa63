use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("BOXSYNC_BASE_URL", "https://admin.example.com");
    m
}

#[test]
fn parse_clear_policy_retain() {
    assert_eq!(parse_clear_policy("retain").unwrap(), ClearPolicy::Retain);
}

#[test]
fn parse_clear_policy_eager() {
    assert_eq!(parse_clear_policy("eager").unwrap(), ClearPolicy::Eager);
}

#[test]
fn parse_clear_policy_unknown_fails() {
    let err = parse_clear_policy("sometimes").unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "BOXSYNC_CLEAR_POLICY")
    );
}

#[test]
fn build_app_config_fails_without_base_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "BOXSYNC_BASE_URL"),
        "expected MissingEnvVar(BOXSYNC_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_base_url_without_scheme() {
    let mut map = full_env();
    map.insert("BOXSYNC_BASE_URL", "admin.example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BOXSYNC_BASE_URL"),
        "expected InvalidEnvVar(BOXSYNC_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.base_url, "https://admin.example.com");
    assert_eq!(cfg.boxes_path, "/admin/commerce/order/boxes/");
    assert_eq!(cfg.edition_control_id, "id_edition");
    assert_eq!(cfg.box_control_id, "id_box");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "boxsync/0.1 (order-form)");
    assert_eq!(cfg.clear_policy, ClearPolicy::Retain);
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = full_env();
    map.insert("BOXSYNC_BOXES_PATH", "/api/boxes/");
    map.insert("BOXSYNC_EDITION_CONTROL_ID", "edition");
    map.insert("BOXSYNC_BOX_CONTROL_ID", "box");
    map.insert("BOXSYNC_REQUEST_TIMEOUT_SECS", "5");
    map.insert("BOXSYNC_USER_AGENT", "custom-agent/2.0");
    map.insert("BOXSYNC_CLEAR_POLICY", "eager");
    map.insert("BOXSYNC_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.boxes_path, "/api/boxes/");
    assert_eq!(cfg.edition_control_id, "edition");
    assert_eq!(cfg.box_control_id, "box");
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
    assert_eq!(cfg.clear_policy, ClearPolicy::Eager);
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = full_env();
    map.insert("BOXSYNC_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BOXSYNC_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(BOXSYNC_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    let mut map = full_env();
    map.insert("BOXSYNC_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, ref reason })
                if var == "BOXSYNC_REQUEST_TIMEOUT_SECS" && reason.contains("greater than zero")
        ),
        "expected InvalidEnvVar(BOXSYNC_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_blank_control_id() {
    let mut map = full_env();
    map.insert("BOXSYNC_BOX_CONTROL_ID", "  ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BOXSYNC_BOX_CONTROL_ID"),
        "expected InvalidEnvVar(BOXSYNC_BOX_CONTROL_ID), got: {result:?}"
    );
}
