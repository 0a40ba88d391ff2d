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

fn config_with(var: &str, value: &str) -> Result<AppConfig, ConfigError> {
    let mut map = HashMap::new();
    map.insert(var, value);
    build_app_config(lookup_from_map(&map))
}

fn assert_invalid(result: Result<AppConfig, ConfigError>, expected: &str) {
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == expected),
        "expected InvalidEnvVar({expected}), got: {result:?}"
    );
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "STOREFRONT_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults are valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.site_url, "http://localhost:3000");
    assert_eq!(cfg.catalog_base_url, DEFAULT_CATALOG_BASE_URL);
    assert_eq!(cfg.catalog_timeout_secs, 30);
    assert_eq!(cfg.catalog_user_agent, "storefront/0.1 (catalog-client)");
    assert_eq!(cfg.catalog_max_retries, 2);
    assert_eq!(cfg.catalog_retry_backoff_base_ms, 250);
    assert_eq!(cfg.cache_ttl_secs, 3600);
    assert_eq!(cfg.cache_refresh_cron, "0 0 * * * *");
    assert!(cfg.og_images_enabled);
    assert_eq!(cfg.filters, FilterFeatures::default());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    assert_invalid(
        config_with("STOREFRONT_BIND_ADDR", "not-a-socket-addr"),
        "STOREFRONT_BIND_ADDR",
    );
}

#[test]
fn build_app_config_fails_on_misspelled_env() {
    assert_invalid(config_with("STOREFRONT_ENV", "producton"), "STOREFRONT_ENV");
}

#[test]
fn site_url_trailing_slash_is_stripped() {
    let cfg = config_with("STOREFRONT_SITE_URL", "https://shop.example.com/").unwrap();
    assert_eq!(cfg.site_url, "https://shop.example.com");
}

#[test]
fn site_url_without_scheme_fails() {
    assert_invalid(
        config_with("STOREFRONT_SITE_URL", "shop.example.com"),
        "STOREFRONT_SITE_URL",
    );
}

#[test]
fn catalog_base_url_override() {
    let cfg = config_with("STOREFRONT_CATALOG_BASE_URL", "http://127.0.0.1:9999").unwrap();
    assert_eq!(cfg.catalog_base_url, "http://127.0.0.1:9999");
}

#[test]
fn catalog_base_url_rejects_ftp() {
    assert_invalid(
        config_with("STOREFRONT_CATALOG_BASE_URL", "ftp://catalog.example.com"),
        "STOREFRONT_CATALOG_BASE_URL",
    );
}

#[test]
fn catalog_timeout_secs_override() {
    let cfg = config_with("STOREFRONT_CATALOG_TIMEOUT_SECS", "5").unwrap();
    assert_eq!(cfg.catalog_timeout_secs, 5);
}

#[test]
fn catalog_timeout_secs_zero_fails() {
    assert_invalid(
        config_with("STOREFRONT_CATALOG_TIMEOUT_SECS", "0"),
        "STOREFRONT_CATALOG_TIMEOUT_SECS",
    );
}

#[test]
fn catalog_max_retries_invalid() {
    assert_invalid(
        config_with("STOREFRONT_CATALOG_MAX_RETRIES", "not-a-number"),
        "STOREFRONT_CATALOG_MAX_RETRIES",
    );
}

#[test]
fn catalog_retry_backoff_base_ms_override() {
    let cfg = config_with("STOREFRONT_CATALOG_RETRY_BACKOFF_BASE_MS", "10").unwrap();
    assert_eq!(cfg.catalog_retry_backoff_base_ms, 10);
}

#[test]
fn cache_ttl_secs_override() {
    let cfg = config_with("STOREFRONT_CACHE_TTL_SECS", "60").unwrap();
    assert_eq!(cfg.cache_ttl_secs, 60);
}

#[test]
fn cache_ttl_secs_invalid() {
    assert_invalid(
        config_with("STOREFRONT_CACHE_TTL_SECS", "-1"),
        "STOREFRONT_CACHE_TTL_SECS",
    );
}

#[test]
fn og_images_can_be_disabled() {
    for raw in ["false", "0", "NO"] {
        let cfg = config_with("STOREFRONT_OG_IMAGES_ENABLED", raw).unwrap();
        assert!(!cfg.og_images_enabled, "{raw}");
    }
}

#[test]
fn og_images_flag_invalid() {
    assert_invalid(
        config_with("STOREFRONT_OG_IMAGES_ENABLED", "maybe"),
        "STOREFRONT_OG_IMAGES_ENABLED",
    );
}

#[test]
fn filter_toggles_override() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_FILTER_CATEGORY", "false");
    map.insert("STOREFRONT_FILTER_PRICE", "no");
    map.insert("STOREFRONT_FILTER_PRICE_CEILING", "250");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(!cfg.filters.category);
    assert!(cfg.filters.sort);
    assert!(!cfg.filters.price);
    assert!((cfg.filters.price_ceiling - 250.0).abs() < f64::EPSILON);
}

#[test]
fn price_ceiling_must_be_positive() {
    assert_invalid(
        config_with("STOREFRONT_FILTER_PRICE_CEILING", "0"),
        "STOREFRONT_FILTER_PRICE_CEILING",
    );
    assert_invalid(
        config_with("STOREFRONT_FILTER_PRICE_CEILING", "lots"),
        "STOREFRONT_FILTER_PRICE_CEILING",
    );
}
