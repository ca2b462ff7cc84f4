//! Lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! panic            → hooks::install_panic_hook   ┐
//! task failure     → hooks::report_unhandled_rejection ├─► TerminationEvent
//! logger dropped   → hooks::ExitGuard            ┘
//!
//! TerminationEvent
//!     → ShutdownCoordinator::dispatch (one flushed final record)
//!     → process::exit(code) iff the event requests an exit
//! ```
//!
//! # Design Decisions
//! - One coordinator instance owns every termination decision; handlers are
//!   thin adapters that build events, never log themselves
//! - The final record is written through a synchronous destination and
//!   flushed before any termination call
//! - Crash handlers are only wired in production; development and test keep
//!   the runtime's default panic output

pub mod hooks;
pub mod shutdown;

pub use hooks::ExitGuard;
pub use shutdown::RejectionReason;
pub use shutdown::Severity;
pub use shutdown::ShutdownCoordinator;
pub use shutdown::TerminationEvent;
