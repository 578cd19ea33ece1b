//! Sink contract
//!
//! A sink formats and persists entries. Importance filtering and masking
//! happen once, in the dispatcher; a sink sees only what it must emit.

pub mod console;
pub mod file;
pub mod memory;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use memory::MemorySink;

use crate::domain::{Importance, Level, LogEntry};
use std::any::Any;
use std::borrow::Borrow;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Entry rejected: {0}")]
    Rejected(String),

    #[error("Sink panicked: {0}")]
    Panicked(String),
}

/// An output channel for normalized entries.
pub trait Sink: Send + Sync {
    /// Persist or display one entry. The entry's level is already known to
    /// pass this sink's threshold.
    fn accept(&self, entry: &LogEntry) -> Result<(), SinkError>;

    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn accept(&self, entry: &LogEntry) -> Result<(), SinkError> {
        (**self).accept(entry)
    }

    fn flush(&self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn accept(&self, entry: &LogEntry) -> Result<(), SinkError> {
        (**self).accept(entry)
    }

    fn flush(&self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

/// Stable identity of a sink inside one dispatcher. Masks are sets of these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SinkId(Arc<str>);

impl SinkId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SinkId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SinkId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SinkId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl From<&SinkId> for SinkId {
    fn from(id: &SinkId) -> Self {
        id.clone()
    }
}

/// A sink registered with a dispatcher: identity, threshold and the sink.
///
/// The minimum importance defaults to INFO and is fixed once the handle is
/// handed to a dispatcher.
#[derive(Clone)]
pub struct SinkHandle {
    id: SinkId,
    min_importance: Importance,
    sink: Arc<dyn Sink>,
}

impl SinkHandle {
    pub fn new(id: impl Into<SinkId>, sink: impl Sink + 'static) -> Self {
        Self::from_arc(id, Arc::new(sink))
    }

    pub fn from_arc(id: impl Into<SinkId>, sink: Arc<dyn Sink>) -> Self {
        Self {
            id: id.into(),
            min_importance: Level::INFO.importance(),
            sink,
        }
    }

    pub fn with_min_level(self, level: &Level) -> Self {
        self.with_min_importance(level.importance())
    }

    pub fn with_min_importance(mut self, min_importance: Importance) -> Self {
        self.min_importance = min_importance;
        self
    }

    pub fn id(&self) -> &SinkId {
        &self.id
    }

    pub fn min_importance(&self) -> Importance {
        self.min_importance
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    /// Bare calls (no level) always pass.
    pub fn accepts(&self, level: Option<&Level>) -> bool {
        level.is_none_or(|level| level.passes(self.min_importance))
    }

    /// Hand every entry to the sink in order, stopping at the first failure.
    ///
    /// Panics inside the sink are caught and returned as `SinkError::Panicked`
    /// together with the index of the failing entry.
    pub(crate) fn deliver(&self, entries: &[LogEntry]) -> Result<(), (usize, SinkError)> {
        for (index, entry) in entries.iter().enumerate() {
            panic::catch_unwind(AssertUnwindSafe(|| self.sink.accept(entry)))
                .unwrap_or_else(|payload| Err(SinkError::Panicked(panic_message(&*payload))))
                .map_err(|error| (index, error))?;
        }
        Ok(())
    }
}

impl fmt::Debug for SinkHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkHandle")
            .field("id", &self.id)
            .field("min_importance", &self.min_importance)
            .finish_non_exhaustive()
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
