//! Diagnostics of the dispatcher itself.
//!
//! Routing decisions and sink failures are reported through `tracing`, never
//! through the sinks being dispatched to. This module installs the process
//! subscriber for binaries that do not bring their own.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticsError {
    #[error("Invalid diagnostics filter '{filter}': {details}")]
    InvalidFilter { filter: String, details: String },

    #[error("Failed to install tracing subscriber: {0}")]
    InstallFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// `EnvFilter` directives, e.g. `"warn,rask_log_dispatch::dispatcher=debug"`
    pub filter: String,
    /// Emit JSON lines instead of compact text
    pub json: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            json: false,
        }
    }
}

impl DiagnosticsConfig {
    /// The configured directives, or `RUST_LOG` when it is set and not blank.
    pub fn env_filter(&self) -> Result<EnvFilter, DiagnosticsError> {
        let directives = match std::env::var(EnvFilter::DEFAULT_ENV) {
            Ok(value) if !value.trim().is_empty() => value,
            _ => self.filter.clone(),
        };

        EnvFilter::try_new(&directives).map_err(|e| DiagnosticsError::InvalidFilter {
            filter: directives.clone(),
            details: e.to_string(),
        })
    }
}

/// Install the global subscriber writing to stderr.
///
/// Only the first call does any work; later calls return its outcome.
pub fn init_diagnostics(config: &DiagnosticsConfig) -> Result<(), DiagnosticsError> {
    static INIT: OnceLock<Result<(), DiagnosticsError>> = OnceLock::new();

    INIT.get_or_init(|| install(config)).clone()
}

fn install(config: &DiagnosticsConfig) -> Result<(), DiagnosticsError> {
    let filter = config.env_filter()?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| DiagnosticsError::InstallFailed(e.to_string()))
}
