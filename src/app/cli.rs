use super::config::{ConfigError, LoggerConfig};
use crate::dispatcher::{DispatchReport, Mask};
use crate::domain::{LevelSpec, LogError, Message};
use crate::logger::Logger;
use clap::Parser;
use serde_json::Value;
use std::io::BufRead;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Logging error: {0}")]
    Log(#[from] LogError),
    #[error("Invalid JSON message '{input}': {source}")]
    InvalidJson {
        input: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "rask-log-dispatch",
    author,
    version,
    about = "Send messages to every configured log sink",
    long_about = None
)]
pub struct Cli {
    /// Configuration file (TOML). Without it RASK_LOG_CONFIG and defaults are used
    #[arg(long, short, env = "RASK_LOG_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Level name (case-insensitive). Omit for a bare call that reaches every sink
    #[arg(long, short)]
    pub level: Option<String>,

    /// Sink ids to exclude from this call (repeat or comma-separate)
    #[arg(long, short, value_delimiter = ',')]
    pub mask: Vec<String>,

    /// Parse each message as JSON; objects become records
    #[arg(long)]
    pub json: bool,

    /// Log every line of stdin as its own call
    #[arg(long, conflicts_with = "messages")]
    pub stdin: bool,

    /// Override the separator between plain values
    #[arg(long)]
    pub separator: Option<String>,

    /// Messages of a single call
    pub messages: Vec<String>,
}

impl Cli {
    /// File (when given) or environment, then `RASK_LOG_*` and flag overrides.
    pub fn load_config(&self) -> Result<LoggerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => {
                let mut config = LoggerConfig::from_file(path)?;
                config.apply_env_overrides()?;
                config
            }
            None => LoggerConfig::from_env()?,
        };

        if let Some(separator) = &self.separator {
            config.separator.clone_from(separator);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn level_spec(&self) -> LevelSpec {
        self.level.as_deref().into()
    }

    /// `None` when no mask flag was given, so the logger's default applies.
    pub fn call_mask(&self) -> Option<Mask> {
        if self.mask.is_empty() {
            None
        } else {
            Some(self.mask.iter().map(String::as_str).collect())
        }
    }

    pub fn parse_message(&self, raw: &str) -> Result<Message, CliError> {
        if !self.json {
            return Ok(Message::from(raw));
        }

        serde_json::from_str::<Value>(raw)
            .map(Message::from)
            .map_err(|source| CliError::InvalidJson {
                input: raw.to_string(),
                source,
            })
    }

    /// Log the positional messages as one call.
    pub fn dispatch_args(&self, logger: &impl Logger) -> Result<DispatchReport, CliError> {
        let messages = self
            .messages
            .iter()
            .map(|raw| self.parse_message(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let mask = self.call_mask();
        Ok(logger.dispatch(messages, self.level_spec(), mask.as_ref())?)
    }

    /// Log every non-empty line of `input` as its own call.
    pub fn dispatch_lines<R: BufRead>(
        &self,
        logger: &impl Logger,
        input: R,
    ) -> Result<Vec<DispatchReport>, CliError> {
        let mask = self.call_mask();
        let level = self.level_spec();
        let mut reports = Vec::new();

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let message = self.parse_message(&line)?;
            reports.push(logger.dispatch(vec![message], level.clone(), mask.as_ref())?);
        }

        debug!(calls = reports.len(), "Finished reading stdin");
        Ok(reports)
    }
}
