//! Message Normalizer
//!
//! Turns the classified arguments of one call into canonical entries:
//! - all plain values: one text entry, values concatenated in order
//! - all records: one entry per record, in order
//! - no arguments: one empty text entry
//! - records mixed with plain values: `NormalizeError::MixedMessage`

use crate::domain::{EntryBody, Level, LogEntry, Message};
use chrono::Utc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error(
        "Expected all messages to be either plain values or records, but got {records} record(s) and {plain} plain value(s)"
    )]
    MixedMessage { records: usize, plain: usize },
}

#[derive(Debug, Clone, Default)]
pub struct MessageNormalizer {
    separator: String,
}

impl MessageNormalizer {
    /// Plain values are concatenated without a separator.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Normalize the arguments of one call.
    ///
    /// Every produced entry carries `level` and the same timestamp.
    pub fn normalize(
        &self,
        messages: Vec<Message>,
        level: Option<&Level>,
    ) -> Result<Vec<LogEntry>, NormalizeError> {
        let records = messages.iter().filter(|m| m.is_record()).count();
        let plain = messages.len() - records;

        if records > 0 && plain > 0 {
            return Err(NormalizeError::MixedMessage { records, plain });
        }

        let timestamp = Utc::now();
        let entry = |body: EntryBody| LogEntry::at(level.cloned(), body, timestamp);

        if records > 0 {
            return Ok(messages
                .into_iter()
                .filter_map(|message| match message {
                    Message::Record(record) => Some(entry(EntryBody::Record(record))),
                    Message::Text(_) => None,
                })
                .collect());
        }

        let texts: Vec<String> = messages
            .into_iter()
            .filter_map(|message| match message {
                Message::Text(text) => Some(text),
                Message::Record(_) => None,
            })
            .collect();

        Ok(vec![entry(EntryBody::Text(texts.join(self.separator.as_str())))])
    }
}
