//! Shutdown coordination: the final-logging handshake.
//!
//! Every way the process can end maps to a [`TerminationEvent`]; the
//! coordinator turns each event into exactly one synchronous log record and
//! at most one termination call. The record is flushed before the process is
//! allowed to die, so the last diagnostic line survives even with a buffered
//! primary destination.

use std::borrow::Cow;
use std::error::Error;
use std::process;

use crate::logger::destination::FinalLogger;

/// Boxed error payload carried by abnormal termination events.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Severity of a final record.
///
/// `Fatal` means an exit is being forced; `Info` records an exit already
/// underway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Fatal,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::Info => "info",
        }
    }
}

/// Reason attached to an unhandled rejection.
#[derive(Debug)]
pub enum RejectionReason {
    /// The rejection carried a real error value.
    Error(BoxError),
    /// The rejection carried an arbitrary non-error value, rendered as text.
    Value(String),
}

/// A process-terminating trigger.
#[derive(Debug)]
pub enum TerminationEvent {
    /// A panic nothing caught.
    UncaughtException { error: BoxError },
    /// A failure from a task nothing was observing.
    UnhandledRejection { reason: RejectionReason },
    /// The process is exiting on its own terms.
    NormalExit { code: i32 },
}

impl TerminationEvent {
    /// Exit code this event requests. `None` is the sentinel for "no
    /// termination call": the process continues or is already exiting.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::UncaughtException { .. } | Self::UnhandledRejection { .. } => Some(1),
            Self::NormalExit { .. } => None,
        }
    }

    /// Derive the single final record this event produces.
    ///
    /// Severity is `Fatal` exactly when an exit is requested.
    pub fn invocation(&self) -> FinalLogInvocation<'_> {
        let severity = if self.exit_code().is_some() {
            Severity::Fatal
        } else {
            Severity::Info
        };

        match self {
            Self::UncaughtException { error } => FinalLogInvocation {
                severity,
                message: Cow::Borrowed("uncaughtException"),
                error: Some(error.as_ref()),
            },
            Self::UnhandledRejection { reason: RejectionReason::Error(error) } => {
                FinalLogInvocation {
                    severity,
                    message: Cow::Borrowed("unhandledRejection"),
                    error: Some(error.as_ref()),
                }
            }
            Self::UnhandledRejection { reason: RejectionReason::Value(value) } => {
                FinalLogInvocation {
                    severity,
                    message: Cow::Owned(format!("unhandledRejection with reason: {value}")),
                    error: None,
                }
            }
            Self::NormalExit { code } => FinalLogInvocation {
                severity,
                message: Cow::Owned(format!("exit with code {code}.")),
                error: None,
            },
        }
    }
}

/// The one log write derived from a termination event.
#[derive(Debug)]
pub struct FinalLogInvocation<'a> {
    pub severity: Severity,
    pub message: Cow<'static, str>,
    pub error: Option<&'a (dyn Error + 'static)>,
}

/// Owns the final-logging decision for every termination trigger.
///
/// Constructed once per logger, bound to a synchronous destination, stateless
/// across dispatches. At most one handler ever reaches a termination call per
/// process lifetime; `process::exit` does not return, so a second event can
/// only be observed when the first one requested no exit.
pub struct ShutdownCoordinator {
    final_logger: FinalLogger,
}

impl ShutdownCoordinator {
    pub fn new(final_logger: FinalLogger) -> Self {
        Self { final_logger }
    }

    /// Write exactly one final record and return the requested exit code.
    ///
    /// Never fails: this is the last line of defense before process death.
    pub fn dispatch(&self, event: &TerminationEvent) -> Option<i32> {
        let invocation = event.invocation();
        self.final_logger
            .write(invocation.severity, &invocation.message, invocation.error);
        event.exit_code()
    }

    /// Dispatch the event, then terminate iff an exit code was requested.
    ///
    /// The log write completes (flushed) before the termination call. The
    /// sentinel code makes no termination call at all: on the normal-exit
    /// path the runtime is already exiting and exiting again would be wrong.
    pub fn handle(&self, event: TerminationEvent) {
        if let Some(code) = self.dispatch(&event) {
            process::exit(code);
        }
    }
}
