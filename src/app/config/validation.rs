use super::{ConfigError, LoggerConfig, SinkKind};
use crate::domain::Level;
use crate::registry::DuplicatePolicy;
use std::collections::HashSet;

impl LoggerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Custom levels
        let mut level_names = HashSet::new();
        for level in &self.levels {
            let canonical = Level::canonical_name(&level.name);
            if canonical.is_empty() {
                return Err(ConfigError::InvalidConfig(
                    "Level name must not be empty".to_string(),
                ));
            }
            if Level::is_builtin_name(&canonical) {
                return Err(ConfigError::InvalidConfig(format!(
                    "Level '{canonical}' is built in and cannot be redefined"
                )));
            }
            if !level_names.insert(canonical.clone())
                && self.on_duplicate_level == DuplicatePolicy::Reject
            {
                return Err(ConfigError::InvalidConfig(format!(
                    "Level '{canonical}' is defined more than once"
                )));
            }
        }

        let known_level = |name: &str| {
            let canonical = Level::canonical_name(name);
            Level::is_builtin_name(&canonical) || level_names.contains(&canonical)
        };

        if !known_level(&self.default_min_level) {
            return Err(ConfigError::InvalidConfig(format!(
                "Default minimum level '{}' is not a built-in or configured level",
                self.default_min_level
            )));
        }

        // Sinks
        let mut sink_ids = HashSet::new();
        for sink in &self.sinks {
            if sink.id.trim().is_empty() {
                return Err(ConfigError::InvalidConfig(
                    "Sink id must not be empty".to_string(),
                ));
            }
            if !sink_ids.insert(sink.id.as_str()) {
                return Err(ConfigError::InvalidConfig(format!(
                    "Sink id '{}' is used more than once",
                    sink.id
                )));
            }
            if sink.kind == SinkKind::File && sink.path.is_none() {
                return Err(ConfigError::InvalidConfig(format!(
                    "File sink '{}' needs a path",
                    sink.id
                )));
            }
            if let Some(min_level) = &sink.min_level
                && !known_level(min_level)
            {
                return Err(ConfigError::InvalidConfig(format!(
                    "Sink '{}' uses unknown minimum level '{min_level}'",
                    sink.id
                )));
            }
        }

        // Default mask
        if let Some(unknown) = self
            .default_mask
            .iter()
            .find(|id| !sink_ids.contains(id.as_str()))
        {
            return Err(ConfigError::InvalidConfig(format!(
                "Default mask names unknown sink '{unknown}'"
            )));
        }

        Ok(())
    }
}
