use super::level::Level;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Ordered mapping of field name to value. Field order is insertion order.
pub type Record = serde_json::Map<String, Value>;

/// Body of a log entry: rendered text or one structured record, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntryBody {
    Text(String),
    Record(Record),
}

impl EntryBody {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            EntryBody::Text(text) => Some(text),
            EntryBody::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            EntryBody::Record(record) => Some(record),
            EntryBody::Text(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            EntryBody::Text(text) => text.is_empty(),
            EntryBody::Record(record) => record.is_empty(),
        }
    }
}

/// The canonical unit a sink consumes.
///
/// Every entry produced by one call shares the same level and timestamp, so
/// all sinks of a dispatch observe identical entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub level: Option<Level>,
    pub body: EntryBody,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(level: Option<Level>, body: EntryBody) -> Self {
        Self::at(level, body, Utc::now())
    }

    pub fn at(level: Option<Level>, body: EntryBody, timestamp: DateTime<Utc>) -> Self {
        Self {
            level,
            body,
            timestamp,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.body.as_text()
    }

    pub fn record(&self) -> Option<&Record> {
        self.body.as_record()
    }

    pub fn level_name(&self) -> Option<&str> {
        self.level.as_ref().map(Level::name)
    }

    /// Entries without a level are never filtered by importance.
    pub fn is_bare(&self) -> bool {
        self.level.is_none()
    }
}
