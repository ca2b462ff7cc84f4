//! Configuration loading from the process environment.

use std::collections::BTreeMap;
use std::env;

use crate::config::schema::{ConfigError, Environment, LoggerConfig};

/// Explicit severity override.
pub const LEVEL_VAR: &str = "LOG_LEVEL";
/// Deployment environment name.
pub const ENVIRONMENT_VAR: &str = "APP_ENV";
/// Master switch, truthy/falsy.
pub const ENABLED_VAR: &str = "LOG_ENABLED";
/// Service name attached to every record.
pub const NAME_VAR: &str = "SERVICE_NAME";

impl LoggerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(&env::vars().collect())
    }

    /// Load configuration from an injected environment mapping.
    ///
    /// Pure variant of [`LoggerConfig::from_env`]; missing variables fall
    /// back to defaults, present-but-invalid values are errors.
    pub fn from_env_map(vars: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = vars.get(LEVEL_VAR) {
            config.level = Some(raw.parse()?);
        }
        if let Some(raw) = vars.get(ENVIRONMENT_VAR) {
            config.environment = Environment::from(raw.clone());
        }
        if let Some(raw) = vars.get(ENABLED_VAR) {
            config.enabled = parse_flag(ENABLED_VAR, raw)?;
        }
        if let Some(raw) = vars.get(NAME_VAR) {
            config.name = raw.clone();
        }

        Ok(config)
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: raw.to_string(),
        }),
    }
}
