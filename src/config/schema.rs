//! Configuration schema and error definitions.
//!
//! All types derive Serde traits so the logger configuration can be embedded
//! in an application's own config file, and every field has a default to
//! allow minimal configs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

/// Logger configuration.
///
/// Usually loaded from the process environment via
/// [`LoggerConfig::from_env`], but can also be deserialized as part of a
/// larger application config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Explicit severity override. Wins over the environment default.
    pub level: Option<Level>,

    /// Deployment environment. Drives the default level and pretty printing.
    pub environment: Environment,

    /// Master switch. When false, nothing is written at all.
    pub enabled: bool,

    /// Service name attached to every log record.
    pub name: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: None,
            environment: Environment::default(),
            enabled: true,
            name: "app".to_string(),
        }
    }
}

/// Deployment environment of the running service.
///
/// Unknown names parse into [`Environment::Other`] rather than failing
/// immediately: an unrecognized environment is only an error once the level
/// has to be derived from it and no explicit override exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Environment {
    Development,
    Test,
    Production,
    /// Any unrecognized environment name, kept verbatim for error reporting.
    Other(String),
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn is_test(&self) -> bool {
        matches!(self, Self::Test)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Environment name as configured.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
            Self::Other(name) => name,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::Development
    }
}

impl From<String> for Environment {
    fn from(name: String) -> Self {
        match name.as_str() {
            "development" => Self::Development,
            "test" => Self::Test,
            "production" => Self::Production,
            _ => Self::Other(name),
        }
    }
}

impl From<Environment> for String {
    fn from(environment: Environment) -> Self {
        environment.as_str().to_string()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity name accepted for the explicit level override.
///
/// `Fatal` and `Silent` exist for configuration compatibility; they map onto
/// the closest `tracing` filters (`ERROR` and `OFF` respectively) since the
/// `tracing` level lattice has neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Silent,
}

impl Level {
    /// The `tracing` filter this level corresponds to.
    pub fn filter(self) -> LevelFilter {
        match self {
            Self::Trace => LevelFilter::TRACE,
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warn => LevelFilter::WARN,
            Self::Error | Self::Fatal => LevelFilter::ERROR,
            Self::Silent => LevelFilter::OFF,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Silent => "silent",
        }
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            "silent" => Ok(Self::Silent),
            _ => Err(ConfigError::InvalidLevel(name.to_string())),
        }
    }
}

impl TryFrom<String> for Level {
    type Error = ConfigError;

    fn try_from(name: String) -> Result<Self, ConfigError> {
        name.parse()
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.as_str().to_string()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while reading or deriving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment name no default level is defined for, with no explicit
    /// override to fall back on.
    #[error("invalid environment value \"{0}\"")]
    InvalidEnvironment(String),

    /// Unrecognized severity name.
    #[error("invalid log level \"{0}\"")]
    InvalidLevel(String),

    /// Boolean variable that is neither truthy nor falsy.
    #[error("invalid boolean \"{value}\" for {var}")]
    InvalidFlag { var: &'static str, value: String },
}
