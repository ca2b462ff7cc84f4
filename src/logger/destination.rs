//! Synchronous destination for shutdown-time records.
//!
//! The primary logger writes through a buffered non-blocking worker, which
//! can lose output if the process dies before the worker drains. Final
//! records therefore go through this logger instead: one serialized line,
//! written and flushed before control returns.

use std::collections::BTreeMap;
use std::error::Error;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::lifecycle::shutdown::Severity;
use crate::logger::serializers;

/// Logger bound to a synchronous, flushing destination.
///
/// Used only by the shutdown coordinator; one record per termination event.
pub struct FinalLogger {
    enabled: bool,
    name: String,
    base: BTreeMap<String, Value>,
    destination: Arc<Mutex<dyn Write + Send>>,
}

impl FinalLogger {
    /// Final logger writing to stdout.
    pub fn stdout(enabled: bool, name: String, base: BTreeMap<String, Value>) -> Self {
        Self::with_destination(enabled, name, base, Arc::new(Mutex::new(io::stdout())))
    }

    /// Final logger writing to an injected destination.
    pub fn with_destination(
        enabled: bool,
        name: String,
        base: BTreeMap<String, Value>,
        destination: Arc<Mutex<dyn Write + Send>>,
    ) -> Self {
        Self {
            enabled,
            name,
            base,
            destination,
        }
    }

    /// Write one record and flush before returning.
    ///
    /// Failures are swallowed: this runs while the process is tearing down,
    /// and there is nowhere left to report them.
    pub fn write(&self, severity: Severity, message: &str, error: Option<&(dyn Error + 'static)>) {
        if !self.enabled {
            return;
        }

        let mut record = Map::new();
        record.insert("level".to_string(), Value::String(severity.as_str().to_string()));
        record.insert(
            "time".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        record.insert("name".to_string(), Value::String(self.name.clone()));
        for (key, value) in &self.base {
            record.insert(key.clone(), value.clone());
        }
        record.insert("msg".to_string(), Value::String(message.to_string()));
        if let Some(err) = error {
            record.insert("error".to_string(), serializers::error(err));
        }

        let line = Value::Object(record).to_string();
        let mut destination = self
            .destination
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(destination, "{line}");
        let _ = destination.flush();
    }
}
