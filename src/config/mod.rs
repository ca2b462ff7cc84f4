//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (LOG_LEVEL, APP_ENV, LOG_ENABLED, SERVICE_NAME)
//!     → loader.rs (read & parse)
//!     → LoggerConfig (validated field values)
//!     → options::LoggerOptions::derive (level selection, pretty gate, metadata)
//! ```
//!
//! # Design Decisions
//! - Every field has a default so an empty environment still yields a
//!   working config
//! - Unknown environment names are kept verbatim; they only become an error
//!   at option-derivation time, and only without an explicit level override
//! - Loading from an injected map keeps parsing testable without touching
//!   real environment variables

pub mod loader;
pub mod schema;

pub use schema::ConfigError;
pub use schema::Environment;
pub use schema::Level;
pub use schema::LoggerConfig;
