//! Logger subsystem.
//!
//! # Data Flow
//! ```text
//! LoggerOptions (derived + merged)
//!     → factory.rs
//!         → primary: tracing subscriber, fmt layer (JSON or pretty),
//!           buffered non-blocking stdout writer
//!         → final: destination.rs, synchronous flushing stdout writer,
//!           used only by the shutdown coordinator
//! ```
//!
//! # Design Decisions
//! - The primary destination is buffered for throughput; the final
//!   destination is synchronous so the last record survives process death
//! - JSON output by default; pretty output only for humans at a terminal
//!   outside production
//! - Error values are serialized with their full source chain

pub mod destination;
pub mod factory;
pub mod serializers;

pub use destination::FinalLogger;
pub use factory::create_logger;
pub use factory::Logger;
pub use factory::LoggerError;
