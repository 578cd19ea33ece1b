#![allow(dead_code)]

use mockall::mock;
use parking_lot::Mutex;
use rask_log_dispatch::{
    LevelRegistry, LogEntry, MultiLogger, MultiLoggerBuilder, Sink, SinkError, SinkHandle,
};
use std::sync::Arc;

mock! {
    pub RecordingSink {}

    impl Sink for RecordingSink {
        fn accept(&self, entry: &LogEntry) -> Result<(), SinkError>;
        fn flush(&self) -> Result<(), SinkError>;
    }
}

/// Every `accept` across a group of sinks, as `(sink, text)` in call order.
pub type Journal = Arc<Mutex<Vec<(String, String)>>>;

/// Sink that appends to a journal shared with other sinks, so tests can
/// check delivery order across sinks.
pub struct JournalSink {
    name: String,
    journal: Journal,
}

impl JournalSink {
    pub fn new(name: &str, journal: &Journal) -> Self {
        Self {
            name: name.to_string(),
            journal: journal.clone(),
        }
    }
}

impl Sink for JournalSink {
    fn accept(&self, entry: &LogEntry) -> Result<(), SinkError> {
        let body = match entry.text() {
            Some(text) => text.to_string(),
            None => serde_json::to_string(&entry.body)?,
        };
        self.journal.lock().push((self.name.clone(), body));
        Ok(())
    }
}

pub struct BrokenSink;

impl Sink for BrokenSink {
    fn accept(&self, _entry: &LogEntry) -> Result<(), SinkError> {
        Err(SinkError::Rejected("backend offline".to_string()))
    }
}

pub struct PanickingSink;

impl Sink for PanickingSink {
    fn accept(&self, _entry: &LogEntry) -> Result<(), SinkError> {
        panic!("sink bug");
    }
}

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

/// Builder with an isolated registry so tests never share custom levels.
pub fn isolated_builder() -> MultiLoggerBuilder {
    MultiLogger::builder().registry(Arc::new(LevelRegistry::new()))
}

/// Logger over journal sinks named `names`, all at the default threshold.
pub fn journal_logger(names: &[&str], journal: &Journal) -> MultiLogger {
    isolated_builder()
        .sinks(
            names
                .iter()
                .map(|name| SinkHandle::new(*name, JournalSink::new(name, journal))),
        )
        .build()
        .unwrap()
}

pub fn sinks_in(journal: &Journal) -> Vec<String> {
    journal.lock().iter().map(|(sink, _)| sink.clone()).collect()
}
