//! Hosting-platform metadata detection.
//!
//! Detection is a pure function over an injected environment mapping; the
//! markers are non-authoritative hints used only to enrich log records.

use std::collections::BTreeMap;

use serde_json::Value;

/// Set in every AWS Lambda execution environment.
const SERVERLESS_MARKER: &str = "AWS_EXECUTION_ENV";

/// Set in every Heroku dyno.
const PAAS_MARKER: &str = "DYNO";

/// Map ambient platform markers into base log metadata.
///
/// The PaaS check runs second and replaces the serverless block outright
/// when both markers are present.
pub fn detect(env: &BTreeMap<String, String>) -> BTreeMap<String, Value> {
    let mut base = BTreeMap::new();

    if env.contains_key(SERVERLESS_MARKER) {
        base.insert("memory_size".to_string(), number(env.get("AWS_LAMBDA_FUNCTION_MEMORY_SIZE")));
        insert_string(&mut base, "region", env.get("AWS_REGION"));
        insert_string(&mut base, "runtime", env.get(SERVERLESS_MARKER));
        insert_string(&mut base, "version", env.get("AWS_LAMBDA_FUNCTION_VERSION"));
    }

    if env.contains_key(PAAS_MARKER) {
        base.clear();
        insert_string(&mut base, "dyno", env.get(PAAS_MARKER));
        base.insert("memory_available".to_string(), number(env.get("MEMORY_AVAILABLE")));
        base.insert("web_memory".to_string(), number(env.get("WEB_MEMORY")));
        base.insert("web_concurrency".to_string(), number(env.get("WEB_CONCURRENCY")));
    }

    base
}

/// String-valued entries are dropped entirely when the variable is absent.
fn insert_string(base: &mut BTreeMap<String, Value>, key: &str, raw: Option<&String>) {
    if let Some(value) = raw {
        base.insert(key.to_string(), Value::String(value.clone()));
    }
}

/// Numeric entries stay present but null when missing or unparsable.
fn number(raw: Option<&String>) -> Value {
    raw.and_then(|value| value.parse::<f64>().ok())
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_markers_no_metadata() {
        assert!(detect(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_serverless_metadata() {
        let base = detect(&env(&[
            ("AWS_EXECUTION_ENV", "AWS_Lambda_rust"),
            ("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "512"),
            ("AWS_REGION", "eu-west-1"),
            ("AWS_LAMBDA_FUNCTION_VERSION", "42"),
        ]));

        assert_eq!(base["memory_size"], json!(512.0));
        assert_eq!(base["region"], json!("eu-west-1"));
        assert_eq!(base["runtime"], json!("AWS_Lambda_rust"));
        assert_eq!(base["version"], json!("42"));
    }

    #[test]
    fn test_serverless_partial_variables() {
        let base = detect(&env(&[("AWS_EXECUTION_ENV", "AWS_Lambda_rust")]));

        // Missing numerics stay as explicit nulls, missing strings vanish.
        assert_eq!(base["memory_size"], Value::Null);
        assert!(!base.contains_key("region"));
        assert!(!base.contains_key("version"));
        assert_eq!(base["runtime"], json!("AWS_Lambda_rust"));
    }

    #[test]
    fn test_paas_metadata() {
        let base = detect(&env(&[
            ("DYNO", "web.1"),
            ("MEMORY_AVAILABLE", "1024"),
            ("WEB_MEMORY", "512"),
            ("WEB_CONCURRENCY", "2"),
        ]));

        assert_eq!(base["dyno"], json!("web.1"));
        assert_eq!(base["memory_available"], json!(1024.0));
        assert_eq!(base["web_memory"], json!(512.0));
        assert_eq!(base["web_concurrency"], json!(2.0));
    }

    #[test]
    fn test_paas_replaces_serverless() {
        let base = detect(&env(&[
            ("AWS_EXECUTION_ENV", "AWS_Lambda_rust"),
            ("DYNO", "worker.3"),
            ("WEB_MEMORY", "512"),
        ]));

        assert_eq!(base["dyno"], json!("worker.3"));
        assert!(!base.contains_key("runtime"));
        assert!(!base.contains_key("memory_size"));
    }

    #[test]
    fn test_unparsable_number_is_null() {
        let base = detect(&env(&[
            ("DYNO", "web.1"),
            ("WEB_MEMORY", "lots"),
        ]));

        assert_eq!(base["web_memory"], Value::Null);
    }
}
