use rask_log_dispatch::app::{ConfigError, LoggerConfig, SinkKind};
use rask_log_dispatch::{DispatchMode, Logger, Value};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("rask-log.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_config_from_file_builds_working_logger() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("out").join("metrics.json");
    let config_path = write_config(
        &dir,
        &format!(
            r#"
default_min_level = "warn"

[[levels]]
name = "critical"
color = "red"
importance = 50

[[sinks]]
id = "metrics"
kind = "file"
path = "{}"
min_level = "info"

[[sinks]]
id = "pager"
kind = "file"
path = "{}"
min_level = "critical"
"#,
            log_path.display(),
            dir.path().join("pager.json").display()
        ),
    );

    let config = LoggerConfig::from_file(&config_path).unwrap();
    assert_eq!(config.sinks.len(), 2);
    assert!(config.sinks.iter().all(|s| s.kind == SinkKind::File));

    let logger = config.build().unwrap();
    logger.info(["metrics only"]).unwrap();
    logger.log(["both"], "CRITICAL").unwrap();

    let metrics: Vec<Value> = serde_json::from_str(&fs::read_to_string(&log_path).unwrap()).unwrap();
    let pager: Vec<Value> =
        serde_json::from_str(&fs::read_to_string(dir.path().join("pager.json")).unwrap()).unwrap();
    assert_eq!(metrics.len(), 2);
    assert_eq!(pager.len(), 1);
    assert_eq!(pager[0]["level"], "CRITICAL");
}

#[test]
fn test_missing_file_is_file_error() {
    let err = LoggerConfig::from_file("/nonexistent/rask-log.toml").unwrap_err();
    assert!(matches!(err, ConfigError::FileError(_)));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "sinks = [ this is not toml");
    assert!(matches!(
        LoggerConfig::from_file(&path),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn test_invalid_enum_value_rejected() {
    let err = LoggerConfig::from_toml_str(r#"dispatch_mode = "parallel""#).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));

    let config = LoggerConfig::from_toml_str(r#"dispatch_mode = "concurrent""#).unwrap();
    assert_eq!(config.dispatch_mode, DispatchMode::Concurrent);
}

#[test]
fn test_duplicate_sink_ids_rejected() {
    let err = LoggerConfig::from_toml_str(
        r#"
[[sinks]]
id = "console"

[[sinks]]
id = "console"
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("used more than once"));
}
