//! Process-level wiring of termination events.
//!
//! All three triggers funnel into the one [`ShutdownCoordinator`] instead of
//! scattering independent handlers:
//!
//! - panics reach it through the panic hook (production only),
//! - unobserved task failures reach it through the installed rejection
//!   handler (production only),
//! - the normal exit record comes from [`ExitGuard`] when the logger is
//!   dropped (always).

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::future::Future;
use std::panic::{self, PanicHookInfo};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, OnceLock};

use tokio::task::JoinHandle;

use crate::lifecycle::shutdown::{
    BoxError, RejectionReason, ShutdownCoordinator, TerminationEvent,
};
use crate::logger::serializers;

static REJECTION_HANDLER: OnceLock<Arc<ShutdownCoordinator>> = OnceLock::new();

/// Install a panic hook that writes a fatal record and terminates with
/// code 1.
///
/// The record is flushed before the exit call; the default unwinding output
/// is replaced entirely.
pub fn install_panic_hook(coordinator: Arc<ShutdownCoordinator>) {
    panic::set_hook(Box::new(move |info| {
        let error = PanicError::from(info);
        coordinator.handle(TerminationEvent::UncaughtException {
            error: Box::new(error),
        });
    }));
}

/// Route future unhandled rejections to `coordinator`.
///
/// First installation wins; later calls are ignored.
pub fn install_rejection_handler(coordinator: Arc<ShutdownCoordinator>) {
    let _ = REJECTION_HANDLER.set(coordinator);
}

/// Report a failure nothing else will observe.
///
/// With a handler installed this is fatal: one flushed record, then exit
/// code 1. Without one (development, test) the failure is logged at error
/// level and the process keeps running, leaving the runtime's default
/// diagnostics visible.
pub fn report_unhandled_rejection(reason: RejectionReason) {
    match REJECTION_HANDLER.get() {
        Some(coordinator) => {
            coordinator.handle(TerminationEvent::UnhandledRejection { reason });
        }
        None => match reason {
            RejectionReason::Error(error) => {
                tracing::error!(
                    error = %serializers::error_chain(error.as_ref()),
                    "unhandled rejection"
                );
            }
            RejectionReason::Value(value) => {
                tracing::error!(reason = %value, "unhandled rejection");
            }
        },
    }
}

/// Spawn a task whose failure is reported as an unhandled rejection.
///
/// An `Err` outcome carries the error itself; a panic inside the task is
/// reported with its payload rendered as text. Success is silent.
pub fn spawn_supervised<F>(future: F) -> JoinHandle<()>
where
    F: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    let task = tokio::spawn(future);
    tokio::spawn(async move {
        match task.await {
            Ok(Ok(())) => {}
            Ok(Err(error)) => report_unhandled_rejection(RejectionReason::Error(error)),
            Err(join_error) if join_error.is_panic() => {
                let payload = join_error.into_panic();
                report_unhandled_rejection(RejectionReason::Value(panic_message(payload.as_ref())));
            }
            // Cancellation is an ordinary outcome, not a rejection.
            Err(_) => {}
        }
    })
}

/// Writes the final "exit with code N." record when dropped.
///
/// Held by the logger for the life of the process. The normal-exit event
/// carries the sentinel exit code, so dropping the guard never triggers a
/// termination call of its own.
pub struct ExitGuard {
    coordinator: Arc<ShutdownCoordinator>,
    code: AtomicI32,
}

impl ExitGuard {
    pub fn new(coordinator: Arc<ShutdownCoordinator>) -> Self {
        Self {
            coordinator,
            code: AtomicI32::new(0),
        }
    }

    /// Record the code the process is going to exit with.
    pub fn record_exit_code(&self, code: i32) {
        self.code.store(code, Ordering::Relaxed);
    }
}

impl Drop for ExitGuard {
    fn drop(&mut self) {
        let code = self.code.load(Ordering::Relaxed);
        self.coordinator.handle(TerminationEvent::NormalExit { code });
    }
}

/// Error value carrying a panic message and origin location.
#[derive(Debug)]
pub struct PanicError {
    message: String,
    location: Option<String>,
}

impl From<&PanicHookInfo<'_>> for PanicError {
    fn from(info: &PanicHookInfo<'_>) -> Self {
        Self {
            message: panic_message(info.payload()),
            location: info.location().map(|location| location.to_string()),
        }
    }
}

impl fmt::Display for PanicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "panic at {}: {}", location, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl Error for PanicError {}

fn panic_message(payload: &dyn Any) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
