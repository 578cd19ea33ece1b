pub mod env;
mod validation;

use self::env::{load_env_list, load_env_string, load_env_var};
use super::diagnostics::DiagnosticsConfig;
use crate::dispatcher::{BuildError, DispatchMode, Mask, MultiLogger};
use crate::domain::{Color, Importance, Level};
use crate::registry::{
    DuplicatePolicy, LevelRegistry, RegistryError, RegistryPolicy, UnknownLevelPolicy,
};
use crate::sink::{ConsoleSink, FileSink, SinkError, SinkHandle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Whole-document configuration, checked before any override is applied.
pub const CONFIG_ENV: &str = "RASK_LOG_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Environment error: {0}")]
    EnvError(String),
    #[error("Level error: {0}")]
    Registry(#[from] RegistryError),
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
    #[error("Build error: {0}")]
    Build(#[from] BuildError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Human-readable lines on stdout
    #[default]
    Console,
    /// JSON array in a file
    File,
}

/// A custom level to register before any sink is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelConfig {
    pub name: String,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub importance: Option<Importance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SinkConfig {
    pub id: String,
    #[serde(default)]
    pub kind: SinkKind,
    /// Falls back to `LoggerConfig::default_min_level`.
    #[serde(default)]
    pub min_level: Option<String>,
    /// Required for file sinks.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_colored")]
    pub colored: bool,
}

fn default_colored() -> bool {
    true
}

impl SinkConfig {
    pub fn console(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: SinkKind::Console,
            min_level: None,
            path: None,
            colored: true,
        }
    }

    pub fn file(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            kind: SinkKind::File,
            min_level: None,
            path: Some(path.into()),
            colored: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Threshold for sinks that do not set their own
    pub default_min_level: String,
    /// Joins the plain values of one call
    pub separator: String,
    pub dispatch_mode: DispatchMode,
    pub on_duplicate_level: DuplicatePolicy,
    pub on_unknown_level: UnknownLevelPolicy,
    pub levels: Vec<LevelConfig>,
    /// Sink ids excluded unless a call passes its own mask
    pub default_mask: Vec<String>,
    pub sinks: Vec<SinkConfig>,
    pub diagnostics: DiagnosticsConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            default_min_level: "info".to_string(),
            separator: String::new(),
            dispatch_mode: DispatchMode::Sequential,
            on_duplicate_level: DuplicatePolicy::Reject,
            on_unknown_level: UnknownLevelPolicy::AutoRegister,
            levels: Vec::new(),
            default_mask: Vec::new(),
            sinks: vec![SinkConfig::console("console")],
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}

impl LoggerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LoggerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// `RASK_LOG_CONFIG` (whole document) or defaults, then individual
    /// `RASK_LOG_*` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(document) => toml::from_str(&document)?,
            Err(_) => LoggerConfig::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply the individual `RASK_LOG_*` variables on top of this config.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        load_env_string("RASK_LOG_MIN_LEVEL", &mut self.default_min_level);
        load_env_string("RASK_LOG_SEPARATOR", &mut self.separator);
        load_env_var("RASK_LOG_DISPATCH_MODE", &mut self.dispatch_mode)?;
        load_env_var("RASK_LOG_ON_DUPLICATE", &mut self.on_duplicate_level)?;
        load_env_var("RASK_LOG_ON_UNKNOWN", &mut self.on_unknown_level)?;
        load_env_list("RASK_LOG_DEFAULT_MASK", &mut self.default_mask);
        load_env_string("RASK_LOG_DIAGNOSTICS", &mut self.diagnostics.filter);
        Ok(())
    }

    pub fn registry_policy(&self) -> RegistryPolicy {
        RegistryPolicy {
            on_duplicate: self.on_duplicate_level,
            on_unknown: self.on_unknown_level,
        }
    }

    /// A fresh registry holding the built-ins plus the configured levels.
    pub fn build_registry(&self) -> Result<Arc<LevelRegistry>, ConfigError> {
        let registry = LevelRegistry::with_policy(self.registry_policy());
        for level in &self.levels {
            registry.register(&level.name, level.color, level.importance)?;
        }
        Ok(Arc::new(registry))
    }

    /// Build the configured sinks and wire them into a logger backed by
    /// `registry`. Sink thresholds are looked up, never auto-registered.
    pub fn build_logger(&self, registry: Arc<LevelRegistry>) -> Result<MultiLogger, ConfigError> {
        let mut handles = Vec::with_capacity(self.sinks.len());
        for sink in &self.sinks {
            let min_level = self.min_level_for(sink, &registry)?;
            let handle = match sink.kind {
                SinkKind::Console => SinkHandle::new(
                    sink.id.as_str(),
                    ConsoleSink::stdout().with_colors(sink.colored),
                ),
                SinkKind::File => {
                    let path = sink.path.as_ref().ok_or_else(|| {
                        ConfigError::InvalidConfig(format!("File sink '{}' needs a path", sink.id))
                    })?;
                    SinkHandle::new(sink.id.as_str(), FileSink::new(path)?)
                }
            };
            handles.push(handle.with_min_level(&min_level));
        }

        let logger = MultiLogger::builder()
            .sinks(handles)
            .default_mask(self.default_mask.iter().map(String::as_str).collect::<Mask>())
            .registry(registry)
            .separator(self.separator.as_str())
            .mode(self.dispatch_mode)
            .build()?;
        Ok(logger)
    }

    /// `build_registry` followed by `build_logger`.
    pub fn build(&self) -> Result<MultiLogger, ConfigError> {
        self.build_logger(self.build_registry()?)
    }

    fn min_level_for(
        &self,
        sink: &SinkConfig,
        registry: &LevelRegistry,
    ) -> Result<Level, ConfigError> {
        let name = sink
            .min_level
            .as_deref()
            .unwrap_or(self.default_min_level.as_str());
        registry.get(name).ok_or_else(|| {
            ConfigError::Registry(RegistryError::UnknownLevel {
                name: Level::canonical_name(name),
            })
        })
    }
}
