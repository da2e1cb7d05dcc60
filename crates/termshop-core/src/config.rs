use std::path::PathBuf;

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
/// Unlike [`load_app_config`], this does NOT load `.env` files. Useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup, no `set_var`/`remove_var` needed.
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

    let api_base_url = require("TERMSHOP_API_BASE_URL")?;
    let token_path = PathBuf::from(or_default("TERMSHOP_TOKEN_PATH", "./.termshop/token"));
    let request_timeout_secs = parse_u64("TERMSHOP_REQUEST_TIMEOUT_SECS", "30")?;
    let log_level = or_default("TERMSHOP_LOG_LEVEL", "info");
    let user_agent = or_default("TERMSHOP_USER_AGENT", "termshop/0.1 (storefront-client)");

    Ok(AppConfig {
        api_base_url,
        token_path,
        request_timeout_secs,
        log_level,
        user_agent,
    })
}

#[cfg(test)]
mod tests {
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

    /// Returns a map with all required env vars populated with valid values.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("TERMSHOP_API_BASE_URL", "http://localhost:3000/api");
        m
    }

    #[test]
    fn build_app_config_fails_without_api_base_url() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "TERMSHOP_API_BASE_URL"),
            "expected MissingEnvVar(TERMSHOP_API_BASE_URL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_defaults() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).expect("config should build");
        assert_eq!(cfg.api_base_url, "http://localhost:3000/api");
        assert_eq!(cfg.token_path, PathBuf::from("./.termshop/token"));
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.user_agent, "termshop/0.1 (storefront-client)");
    }

    #[test]
    fn request_timeout_secs_override() {
        let mut map = full_env();
        map.insert("TERMSHOP_REQUEST_TIMEOUT_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config should build");
        assert_eq!(cfg.request_timeout_secs, 60);
    }

    #[test]
    fn request_timeout_secs_invalid() {
        let mut map = full_env();
        map.insert("TERMSHOP_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TERMSHOP_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(TERMSHOP_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn token_path_override() {
        let mut map = full_env();
        map.insert("TERMSHOP_TOKEN_PATH", "/tmp/termshop-token");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config should build");
        assert_eq!(cfg.token_path, PathBuf::from("/tmp/termshop-token"));
    }

    #[test]
    fn log_level_override() {
        let mut map = full_env();
        map.insert("TERMSHOP_LOG_LEVEL", "debug");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config should build");
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn user_agent_override() {
        let mut map = full_env();
        map.insert("TERMSHOP_USER_AGENT", "kiosk/2.0");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config should build");
        assert_eq!(cfg.user_agent, "kiosk/2.0");
    }
}
