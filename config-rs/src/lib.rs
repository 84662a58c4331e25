//! config-rs/lib.rs
//! Shared configuration utilities for the validation tools
//! Reads settings from the environment (optionally seeded from `.env`)

use std::env;
use std::path::PathBuf;

/// Fixture file read by the driver when nothing else is configured
pub const DEFAULT_FIXTURE_PATH: &str = "./test.json";

/// Log filter used when nothing else is configured
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable naming the fixture file
pub const FIXTURE_PATH_VAR: &str = "VALIDATOR_FIXTURE_PATH";

/// Environment variable holding the log filter
pub const LOG_LEVEL_VAR: &str = "VALIDATOR_LOG_LEVEL";

/// Environment variable turning failed URI checks into a non-zero exit
pub const STRICT_VAR: &str = "VALIDATOR_STRICT";

/// Load variables from a `.env` file if one exists
pub fn load_dotenv() {
    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            log::warn!("Ignoring unreadable .env file: {}", e);
        }
    }
}

/// Get an environment variable, falling back to `default` when unset or empty
pub fn get_env_or(var_name: &str, default: &str) -> String {
    lookup_or(|name| env::var(name).ok(), var_name, default)
}

/// Get a boolean environment variable
///
/// Accepts `1/0`, `true/false`, `yes/no`, `on/off` (any case). Anything else
/// logs a warning and yields `default`.
pub fn get_bool_env(var_name: &str, default: bool) -> bool {
    lookup_bool(|name| env::var(name).ok(), var_name, default)
}

fn lookup_or<F>(lookup: F, var_name: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var_name)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn lookup_bool<F>(lookup: F, var_name: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var_name) else {
        return default;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        "" => default,
        _ => {
            log::warn!("Invalid boolean in {}: '{}', using default {}", var_name, raw, default);
            default
        }
    }
}

/// Settings for the validation driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Fixture file to evaluate
    pub fixture_path: PathBuf,
    /// `env_logger` filter string
    pub log_level: String,
    /// Exit non-zero when any record fails its URI check
    pub strict: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            fixture_path: PathBuf::from(DEFAULT_FIXTURE_PATH),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            strict: false,
        }
    }
}

impl DriverConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            fixture_path: PathBuf::from(lookup_or(&lookup, FIXTURE_PATH_VAR, DEFAULT_FIXTURE_PATH)),
            log_level: lookup_or(&lookup, LOG_LEVEL_VAR, DEFAULT_LOG_LEVEL),
            strict: lookup_bool(&lookup, STRICT_VAR, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DriverConfig::from_lookup(source(&[]));
        assert_eq!(config, DriverConfig::default());
        assert_eq!(config.fixture_path, PathBuf::from("./test.json"));
        assert_eq!(config.log_level, "info");
        assert!(!config.strict);
    }

    #[test]
    fn test_overrides() {
        let config = DriverConfig::from_lookup(source(&[
            (FIXTURE_PATH_VAR, "/tmp/hosts.json"),
            (LOG_LEVEL_VAR, "debug"),
            (STRICT_VAR, "Yes"),
        ]));
        assert_eq!(config.fixture_path, PathBuf::from("/tmp/hosts.json"));
        assert_eq!(config.log_level, "debug");
        assert!(config.strict);
    }

    #[test]
    fn test_blank_and_invalid_values_fall_back() {
        let config = DriverConfig::from_lookup(source(&[
            (FIXTURE_PATH_VAR, "  "),
            (STRICT_VAR, "maybe"),
        ]));
        assert_eq!(config.fixture_path, PathBuf::from(DEFAULT_FIXTURE_PATH));
        assert!(!config.strict);
    }

    #[test]
    fn test_get_env_or() {
        std::env::set_var("CONFIG_RS_TEST_VALUE", "9000");
        assert_eq!(get_env_or("CONFIG_RS_TEST_VALUE", "8000"), "9000");

        std::env::remove_var("CONFIG_RS_UNKNOWN_VALUE");
        assert_eq!(get_env_or("CONFIG_RS_UNKNOWN_VALUE", "8000"), "8000");
    }

    #[test]
    fn test_get_bool_env() {
        std::env::set_var("CONFIG_RS_TEST_FLAG", "off");
        assert!(!get_bool_env("CONFIG_RS_TEST_FLAG", true));

        std::env::remove_var("CONFIG_RS_UNKNOWN_FLAG");
        assert!(get_bool_env("CONFIG_RS_UNKNOWN_FLAG", true));
    }
}
