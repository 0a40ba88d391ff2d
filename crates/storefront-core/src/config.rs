use crate::app_config::{AppConfig, Environment};
use crate::features::FilterFeatures;
use crate::ConfigError;

/// Catalog API used when `STOREFRONT_CATALOG_BASE_URL` is unset.
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://fakestoreapi.com";

/// Load application configuration from environment variables already in the process.
///
/// Does NOT load `.env` files; the binaries call `dotenvy` first.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
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

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        parse_flag(&or_default(var, default))
            .ok_or_else(|| invalid(var, "expected true/false, 1/0 or yes/no".to_string()))
    };

    let env = parse_environment(&or_default("STOREFRONT_ENV", "development"))?;
    let bind_addr = parse_addr("STOREFRONT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("STOREFRONT_LOG_LEVEL", "info");

    let site_url = parse_base_url(
        "STOREFRONT_SITE_URL",
        &or_default("STOREFRONT_SITE_URL", "http://localhost:3000"),
    )?;
    let catalog_base_url = parse_base_url(
        "STOREFRONT_CATALOG_BASE_URL",
        &or_default("STOREFRONT_CATALOG_BASE_URL", DEFAULT_CATALOG_BASE_URL),
    )?;

    let catalog_timeout_secs = parse_u64("STOREFRONT_CATALOG_TIMEOUT_SECS", "30")?;
    if catalog_timeout_secs == 0 {
        return Err(invalid(
            "STOREFRONT_CATALOG_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let catalog_user_agent = or_default(
        "STOREFRONT_CATALOG_USER_AGENT",
        "storefront/0.1 (catalog-client)",
    );
    let catalog_max_retries = parse_u32("STOREFRONT_CATALOG_MAX_RETRIES", "2")?;
    let catalog_retry_backoff_base_ms =
        parse_u64("STOREFRONT_CATALOG_RETRY_BACKOFF_BASE_MS", "250")?;

    let cache_ttl_secs = parse_u64("STOREFRONT_CACHE_TTL_SECS", "3600")?;
    let cache_refresh_cron = or_default("STOREFRONT_CACHE_REFRESH_CRON", "0 0 * * * *");

    let og_images_enabled = parse_bool("STOREFRONT_OG_IMAGES_ENABLED", "true")?;

    let price_ceiling = or_default("STOREFRONT_FILTER_PRICE_CEILING", "1000")
        .parse::<f64>()
        .map_err(|e| invalid("STOREFRONT_FILTER_PRICE_CEILING", e.to_string()))?;
    if !price_ceiling.is_finite() || price_ceiling <= 0.0 {
        return Err(invalid(
            "STOREFRONT_FILTER_PRICE_CEILING",
            "must be a positive number".to_string(),
        ));
    }

    let filters = FilterFeatures {
        category: parse_bool("STOREFRONT_FILTER_CATEGORY", "true")?,
        sort: parse_bool("STOREFRONT_FILTER_SORT", "true")?,
        price: parse_bool("STOREFRONT_FILTER_PRICE", "true")?,
        price_ceiling,
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        site_url,
        catalog_base_url,
        catalog_timeout_secs,
        catalog_user_agent,
        catalog_max_retries,
        catalog_retry_backoff_base_ms,
        cache_ttl_secs,
        cache_refresh_cron,
        og_images_enabled,
        filters,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Requires an `http(s)://` URL and strips trailing slashes.
fn parse_base_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .split_once("://")
        .is_some_and(|(scheme, host)| matches!(scheme, "http" | "https") && !host.is_empty());
    if !has_host {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected an http(s) URL, got \"{raw}\""),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
