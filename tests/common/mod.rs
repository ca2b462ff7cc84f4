//! Shared fixtures for integration tests.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use service_logger::logger::FinalLogger;
use service_logger::ShutdownCoordinator;

/// Captures final log records in memory.
pub struct Capture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Capture {
    pub fn new() -> Self {
        Self {
            buffer: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Build a coordinator whose final logger writes into this capture.
    pub fn coordinator(&self, name: &str, base: BTreeMap<String, Value>) -> ShutdownCoordinator {
        let destination: Arc<Mutex<dyn Write + Send>> = self.buffer.clone();
        ShutdownCoordinator::new(FinalLogger::with_destination(
            true,
            name.to_string(),
            base,
            destination,
        ))
    }

    /// All records written so far, parsed.
    pub fn records(&self) -> Vec<Value> {
        let bytes = self.buffer.lock().unwrap();
        String::from_utf8(bytes.clone())
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).expect("record is valid JSON"))
            .collect()
    }
}
