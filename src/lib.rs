//! Environment-driven structured logging for services.
//!
//! A thin configuration layer over the `tracing` stack: derives logging
//! options from environment configuration, constructs the process logger,
//! and wires the shutdown handshake that guarantees one final, flushed log
//! record before the process dies.
//!
//! ```text
//! LoggerConfig (LOG_LEVEL, APP_ENV, LOG_ENABLED, SERVICE_NAME)
//!     → options (level selection, pretty gate, platform metadata)
//!     → logger  (primary subscriber + synchronous final logger)
//!     → lifecycle (shutdown coordinator, panic/rejection/exit wiring)
//! ```
//!
//! # Example
//! ```no_run
//! use service_logger::{create_logger, LoggerConfig, LoggerOverrides};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LoggerConfig::from_env()?;
//!     let logger = create_logger(LoggerOverrides::default(), &config)?;
//!
//!     logger.info("service starting");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod lifecycle;
pub mod logger;
pub mod options;

pub use config::{ConfigError, Environment, Level, LoggerConfig};
pub use lifecycle::{RejectionReason, ShutdownCoordinator, TerminationEvent};
pub use logger::{create_logger, Logger, LoggerError};
pub use options::{LoggerOptions, LoggerOverrides};
