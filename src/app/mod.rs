pub mod cli;
pub mod config;
pub mod diagnostics;

pub use cli::{Cli, CliError};
pub use config::{ConfigError, LevelConfig, LoggerConfig, SinkConfig, SinkKind};
pub use diagnostics::{DiagnosticsConfig, DiagnosticsError, init_diagnostics};
