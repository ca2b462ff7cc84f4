//! Factory behavior that needs a real process: the global subscriber can
//! only be installed once.

use service_logger::{create_logger, Environment, LoggerConfig, LoggerError, LoggerOverrides};

#[test]
fn test_global_subscriber_installs_exactly_once() {
    // Development: no crash handlers are wired, so test panics in this
    // binary keep their default behavior.
    let config = LoggerConfig {
        environment: Environment::Development,
        name: "itest".to_string(),
        ..LoggerConfig::default()
    };

    let logger = create_logger(LoggerOverrides::default(), &config).expect("first install");
    assert_eq!(logger.name(), "itest");
    logger.info("logger constructed");

    let err = create_logger(LoggerOverrides::default(), &config).unwrap_err();
    assert!(matches!(err, LoggerError::AlreadyInitialized));
}
