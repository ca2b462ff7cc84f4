//! Logger construction.

use std::collections::BTreeMap;
use std::io::{self, IsTerminal};
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::config::{ConfigError, LoggerConfig};
use crate::lifecycle::hooks::{self, ExitGuard};
use crate::lifecycle::ShutdownCoordinator;
use crate::logger::destination::FinalLogger;
use crate::logger::serializers;
use crate::options::{LoggerOptions, LoggerOverrides};

/// Errors that can occur during logger construction.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A global tracing subscriber is already installed.
    #[error("a global logger is already installed")]
    AlreadyInitialized,
}

/// Handle to the configured logger.
///
/// Owns the non-blocking writer guard (dropping the handle flushes the
/// primary destination) and the exit guard that records the normal-exit
/// event, so it should live for the whole process.
pub struct Logger {
    name: String,
    base: BTreeMap<String, Value>,
    exit_guard: ExitGuard,
    _worker_guard: WorkerGuard,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

/// Construct the process logger.
///
/// Derives options from `config`, merges `overrides` on top (caller wins),
/// installs the global subscriber over a buffered stdout writer, and wires
/// the shutdown coordinator: the exit record unconditionally, crash handlers
/// only in production. In development and test the runtime's own panic
/// output is easier to read than JSON.
pub fn create_logger(
    overrides: LoggerOverrides,
    config: &LoggerConfig,
) -> Result<Logger, LoggerError> {
    let env: BTreeMap<String, String> = std::env::vars().collect();
    let options =
        LoggerOptions::derive(config, &env, io::stdout().is_terminal())?.merged(overrides);

    let (writer, worker_guard) = tracing_appender::non_blocking(io::stdout());
    init_subscriber(&options, writer)?;

    let final_logger =
        FinalLogger::stdout(options.enabled, options.name.clone(), options.base.clone());
    let coordinator = Arc::new(ShutdownCoordinator::new(final_logger));

    let exit_guard = ExitGuard::new(coordinator.clone());
    if config.environment.is_production() {
        hooks::install_panic_hook(coordinator.clone());
        hooks::install_rejection_handler(coordinator);
    }

    let logger = Logger {
        name: options.name,
        base: options.base,
        exit_guard,
        _worker_guard: worker_guard,
    };

    if !logger.base.is_empty() {
        let platform = Value::Object(logger.base.clone().into_iter().collect());
        tracing::debug!(
            service = %logger.name,
            platform = %platform,
            "platform metadata detected"
        );
    }

    Ok(logger)
}

fn init_subscriber(options: &LoggerOptions, writer: NonBlocking) -> Result<(), LoggerError> {
    // RUST_LOG can refine the derived level, but never re-enable a logger
    // that was switched off.
    let filter = if options.enabled {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(options.level.filter().to_string()))
    } else {
        EnvFilter::new("off")
    };

    let registry = tracing_subscriber::registry().with(filter);

    if options.pretty {
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(true)
            .with_target(false)
            .with_timer(ChronoLocal::rfc_3339());
        tracing::subscriber::set_global_default(registry.with(layer))
            .map_err(|_| LoggerError::AlreadyInitialized)
    } else {
        let layer = fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .with_writer(writer);
        tracing::subscriber::set_global_default(registry.with(layer))
            .map_err(|_| LoggerError::AlreadyInitialized)
    }
}

impl Logger {
    /// Service name attached to every record.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Platform metadata attached to shutdown records.
    pub fn base(&self) -> &BTreeMap<String, Value> {
        &self.base
    }

    /// Record the code the process intends to exit with; reported in the
    /// final exit record.
    pub fn record_exit_code(&self, code: i32) {
        self.exit_guard.record_exit_code(code);
    }

    pub fn trace(&self, message: &str) {
        tracing::trace!(service = %self.name, "{message}");
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!(service = %self.name, "{message}");
    }

    pub fn info(&self, message: &str) {
        tracing::info!(service = %self.name, "{message}");
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!(service = %self.name, "{message}");
    }

    pub fn error(&self, message: &str) {
        tracing::error!(service = %self.name, "{message}");
    }

    /// Highest severity the primary logger can express. Events are tagged
    /// `fatal` so JSON consumers can tell them from ordinary errors.
    pub fn fatal(&self, message: &str) {
        tracing::error!(service = %self.name, fatal = true, "{message}");
    }

    pub fn error_with(&self, error: &(dyn std::error::Error + 'static), message: &str) {
        tracing::error!(
            service = %self.name,
            error = %serializers::error_chain(error),
            "{message}"
        );
    }

    pub fn fatal_with(&self, error: &(dyn std::error::Error + 'static), message: &str) {
        tracing::error!(
            service = %self.name,
            fatal = true,
            error = %serializers::error_chain(error),
            "{message}"
        );
    }
}
