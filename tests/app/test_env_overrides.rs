use rask_log_dispatch::app::{ConfigError, LoggerConfig};
use rask_log_dispatch::{DispatchMode, DuplicatePolicy, UnknownLevelPolicy};
use serial_test::serial;
use std::env;

const ENV_VARS: &[&str] = &[
    "RASK_LOG_CONFIG",
    "RASK_LOG_MIN_LEVEL",
    "RASK_LOG_SEPARATOR",
    "RASK_LOG_DISPATCH_MODE",
    "RASK_LOG_ON_DUPLICATE",
    "RASK_LOG_ON_UNKNOWN",
    "RASK_LOG_DEFAULT_MASK",
    "RASK_LOG_DIAGNOSTICS",
];

fn clean_env() {
    unsafe {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }
}

#[test]
#[serial]
fn test_defaults_without_env() {
    clean_env();

    let config = LoggerConfig::from_env().unwrap();
    assert_eq!(config, LoggerConfig::default());
}

#[test]
#[serial]
fn test_individual_overrides() {
    clean_env();
    unsafe {
        env::set_var("RASK_LOG_MIN_LEVEL", "debug");
        env::set_var("RASK_LOG_SEPARATOR", " | ");
        env::set_var("RASK_LOG_DISPATCH_MODE", "concurrent");
        env::set_var("RASK_LOG_ON_DUPLICATE", "overwrite");
        env::set_var("RASK_LOG_ON_UNKNOWN", "reject");
        env::set_var("RASK_LOG_DIAGNOSTICS", "rask_log_dispatch=debug");
    }

    let config = LoggerConfig::from_env().unwrap();
    assert_eq!(config.default_min_level, "debug");
    assert_eq!(config.separator, " | ");
    assert_eq!(config.dispatch_mode, DispatchMode::Concurrent);
    assert_eq!(config.on_duplicate_level, DuplicatePolicy::Overwrite);
    assert_eq!(config.on_unknown_level, UnknownLevelPolicy::Reject);
    assert_eq!(config.diagnostics.filter, "rask_log_dispatch=debug");

    clean_env();
}

#[test]
#[serial]
fn test_whole_document_then_overrides() {
    clean_env();
    unsafe {
        env::set_var(
            "RASK_LOG_CONFIG",
            r#"
separator = " "

[[sinks]]
id = "console"

[[sinks]]
id = "stderr-copy"
"#,
        );
        env::set_var("RASK_LOG_DEFAULT_MASK", "stderr-copy");
    }

    let config = LoggerConfig::from_env().unwrap();
    assert_eq!(config.separator, " ");
    assert_eq!(config.sinks.len(), 2);
    assert_eq!(config.default_mask, vec!["stderr-copy"]);

    clean_env();
}

#[test]
#[serial]
fn test_invalid_override_is_env_error() {
    clean_env();
    unsafe { env::set_var("RASK_LOG_DISPATCH_MODE", "sometimes") };

    let err = LoggerConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::EnvError(ref msg) if msg.contains("RASK_LOG_DISPATCH_MODE")));

    clean_env();
}

#[test]
#[serial]
fn test_override_must_still_validate() {
    clean_env();
    unsafe { env::set_var("RASK_LOG_DEFAULT_MASK", "missing-sink") };

    assert!(matches!(
        LoggerConfig::from_env(),
        Err(ConfigError::InvalidConfig(_))
    ));

    clean_env();
}
