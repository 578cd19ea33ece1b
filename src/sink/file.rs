use super::{Sink, SinkError};
use crate::domain::{EntryBody, LogEntry};
use chrono::Local;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Keeps every entry in one JSON array on disk.
///
/// Each element is `{"timestamp", "level"?, "message"}` where `message` is
/// the rendered text or the record object. The array is rewritten on every
/// entry; a failed write restores the previous content.
pub struct FileSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSink {
    /// Open (or create) the log file, creating missing parent directories.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, "")?;
        }

        info!(path = %path.display(), "Logging to file");

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries currently stored in the file.
    pub fn read_entries(&self) -> Result<Vec<Value>, SinkError> {
        let content = fs::read_to_string(&self.path)?;
        let trimmed = content.trim();

        if trimmed.is_empty() || trimmed == "[]" {
            return Ok(Vec::new());
        }

        serde_json::from_str::<Vec<Value>>(trimmed).map_err(|e| {
            SinkError::Rejected(format!(
                "existing content of {} is not a JSON array, new logs will not be appended: {e}",
                self.path.display()
            ))
        })
    }

    fn to_json(entry: &LogEntry) -> Value {
        let mut object = Map::new();
        object.insert(
            "timestamp".to_string(),
            Value::String(
                entry
                    .timestamp
                    .with_timezone(&Local)
                    .format(TIMESTAMP_FORMAT)
                    .to_string(),
            ),
        );
        if let Some(level) = &entry.level {
            object.insert("level".to_string(), Value::String(level.name().to_string()));
        }
        let message = match &entry.body {
            EntryBody::Text(text) => Value::String(text.clone()),
            EntryBody::Record(record) => Value::Object(record.clone()),
        };
        object.insert("message".to_string(), message);
        Value::Object(object)
    }

    fn write_entries(&self, entries: &[Value]) -> Result<(), SinkError> {
        let serialized = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }
}

impl Sink for FileSink {
    fn accept(&self, entry: &LogEntry) -> Result<(), SinkError> {
        let _guard = self.write_lock.lock();

        let previous = self.read_entries()?;
        let mut updated = previous.clone();
        updated.push(Self::to_json(entry));

        if let Err(error) = self.write_entries(&updated) {
            if let Err(rollback) = self.write_entries(&previous) {
                warn!(
                    path = %self.path.display(),
                    error = %rollback,
                    "Failed to roll back log file after a write error"
                );
            }
            return Err(error);
        }

        Ok(())
    }
}
