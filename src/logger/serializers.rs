//! Log-record serializers.
//!
//! The `tracing` fmt layers handle ordinary field rendering; these cover
//! error values, which need their `source()` chain walked explicitly.

use std::error::Error;

use serde_json::{json, Value};

/// Serialize an error and its source chain as a JSON object.
///
/// Shape: `{"message": "...", "chain": ["cause", "root cause"]}`. The chain
/// lists the sources only, outermost first, and is empty for leaf errors.
pub fn error(err: &(dyn Error + 'static)) -> Value {
    json!({
        "message": err.to_string(),
        "chain": sources(err),
    })
}

/// Render an error and its source chain as a single line of text.
pub fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut rendered = err.to_string();
    for cause in sources(err) {
        rendered.push_str(": ");
        rendered.push_str(&cause);
    }
    rendered
}

fn sources(err: &(dyn Error + 'static)) -> Vec<String> {
    let mut chain = Vec::new();
    let mut cause = err.source();
    while let Some(current) = cause {
        chain.push(current.to_string());
        cause = current.source();
    }
    chain
}
