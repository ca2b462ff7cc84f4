//! Logger option derivation.
//!
//! # Data Flow
//! ```text
//! LoggerConfig + environment mapping + TTY status
//!     → derive (level selection, pretty gate, platform metadata)
//!     → LoggerOptions
//!     → merged with caller overrides (caller wins)
//!     → logger::create_logger
//! ```
//!
//! # Design Decisions
//! - Derivation is a pure function; the factory injects the real environment
//!   and TTY status at the edge
//! - Explicit level override wins over the environment default and also
//!   suppresses the unknown-environment error
//! - Pretty printing never triggers in production, even on a TTY

pub mod platform;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::config::{ConfigError, Environment, Level, LoggerConfig};

/// Fully derived logger construction options.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggerOptions {
    /// Master switch; false maps to an `OFF` filter.
    pub enabled: bool,

    /// Service name attached to every record.
    pub name: String,

    /// Effective severity floor.
    pub level: Level,

    /// Human-oriented output instead of JSON.
    pub pretty: bool,

    /// Hosting-platform metadata attached to shutdown records and logged at
    /// initialization.
    pub base: BTreeMap<String, Value>,
}

impl LoggerOptions {
    /// Derive options from configuration and ambient process state.
    pub fn derive(
        config: &LoggerConfig,
        env: &BTreeMap<String, String>,
        stdout_is_tty: bool,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            enabled: config.enabled,
            name: config.name.clone(),
            level: select_level(config)?,
            pretty: pretty_enabled(stdout_is_tty, &config.environment),
            base: platform::detect(env),
        })
    }

    /// Apply caller-supplied overrides on top of derived options.
    ///
    /// Overridden fields win outright; `base` merges key-wise with override
    /// entries winning on conflict.
    pub fn merged(mut self, overrides: LoggerOverrides) -> Self {
        if let Some(enabled) = overrides.enabled {
            self.enabled = enabled;
        }
        if let Some(name) = overrides.name {
            self.name = name;
        }
        if let Some(level) = overrides.level {
            self.level = level;
        }
        if let Some(pretty) = overrides.pretty {
            self.pretty = pretty;
        }
        self.base.extend(overrides.base);
        self
    }
}

/// Caller-supplied partial options, merged over derived ones.
#[derive(Debug, Clone, Default)]
pub struct LoggerOverrides {
    pub enabled: Option<bool>,
    pub name: Option<String>,
    pub level: Option<Level>,
    pub pretty: Option<bool>,
    pub base: BTreeMap<String, Value>,
}

/// Select the effective level for a configuration.
///
/// The explicit override wins; otherwise the environment decides. An
/// environment without a defined default is a configuration error.
pub fn select_level(config: &LoggerConfig) -> Result<Level, ConfigError> {
    if let Some(level) = config.level {
        return Ok(level);
    }

    match &config.environment {
        Environment::Development => Ok(Level::Debug),
        Environment::Test => Ok(Level::Error),
        Environment::Production => Ok(Level::Info),
        Environment::Other(name) => Err(ConfigError::InvalidEnvironment(name.clone())),
    }
}

/// Pretty output is for humans at a terminal in development or test; any
/// other combination gets JSON.
pub fn pretty_enabled(stdout_is_tty: bool, environment: &Environment) -> bool {
    stdout_is_tty && (environment.is_test() || environment.is_development())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(environment: Environment, level: Option<Level>) -> LoggerConfig {
        LoggerConfig {
            level,
            environment,
            ..LoggerConfig::default()
        }
    }

    #[test]
    fn test_level_defaults_per_environment() {
        let cases = [
            (Environment::Development, Level::Debug),
            (Environment::Test, Level::Error),
            (Environment::Production, Level::Info),
        ];
        for (environment, expected) in cases {
            let selected = select_level(&config(environment, None)).unwrap();
            assert_eq!(selected, expected);
        }
    }

    #[test]
    fn test_explicit_level_wins() {
        let selected = select_level(&config(Environment::Production, Some(Level::Trace))).unwrap();
        assert_eq!(selected, Level::Trace);
    }

    #[test]
    fn test_unknown_environment_is_error() {
        let result = select_level(&config(Environment::Other("staging".to_string()), None));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvironment(name)) if name == "staging"
        ));
    }

    #[test]
    fn test_explicit_level_suppresses_unknown_environment_error() {
        let cfg = config(Environment::Other("staging".to_string()), Some(Level::Warn));
        assert_eq!(select_level(&cfg).unwrap(), Level::Warn);
    }

    #[test]
    fn test_pretty_gate() {
        let cases = [
            (true, Environment::Development, true),
            (true, Environment::Test, true),
            (true, Environment::Production, false),
            (false, Environment::Development, false),
            (false, Environment::Test, false),
            (false, Environment::Production, false),
        ];
        for (tty, environment, expected) in cases {
            assert_eq!(pretty_enabled(tty, &environment), expected, "{environment} tty={tty}");
        }
    }

    #[test]
    fn test_derive_carries_config_fields() {
        let cfg = LoggerConfig {
            name: "billing".to_string(),
            environment: Environment::Production,
            ..LoggerConfig::default()
        };
        let options = LoggerOptions::derive(&cfg, &BTreeMap::new(), false).unwrap();

        assert!(options.enabled);
        assert_eq!(options.name, "billing");
        assert_eq!(options.level, Level::Info);
        assert!(!options.pretty);
        assert!(options.base.is_empty());
    }

    #[test]
    fn test_merged_caller_wins() {
        let cfg = config(Environment::Production, None);
        let derived = LoggerOptions::derive(&cfg, &BTreeMap::new(), false).unwrap();

        let options = derived.merged(LoggerOverrides {
            level: Some(Level::Trace),
            name: Some("worker".to_string()),
            ..LoggerOverrides::default()
        });

        assert_eq!(options.level, Level::Trace);
        assert_eq!(options.name, "worker");
        assert!(options.enabled); // Untouched fields keep derived values
    }

    #[test]
    fn test_merged_base_is_keywise() {
        let mut derived = LoggerOptions::derive(
            &config(Environment::Production, None),
            &BTreeMap::new(),
            false,
        )
        .unwrap();
        derived.base.insert("region".to_string(), json!("eu-west-1"));
        derived.base.insert("runtime".to_string(), json!("provided"));

        let options = derived.merged(LoggerOverrides {
            base: BTreeMap::from([
                ("region".to_string(), json!("us-east-1")),
                ("cluster".to_string(), json!("blue")),
            ]),
            ..LoggerOverrides::default()
        });

        assert_eq!(options.base["region"], json!("us-east-1"));
        assert_eq!(options.base["runtime"], json!("provided"));
        assert_eq!(options.base["cluster"], json!("blue"));
    }
}
