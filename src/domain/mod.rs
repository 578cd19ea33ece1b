//! Domain layer for rask-log-dispatch.
//!
//! Contains the canonical types shared across all modules:
//! - `Level`: Severity with display color and importance
//! - `Message`: One classified argument of a logging call
//! - `LogEntry`: The normalized unit every sink consumes
//! - `LogError`: Error returned by a logging call

pub mod error;
pub mod level;
pub mod log_entry;
pub mod message;

pub use error::LogError;
pub use level::{Color, Importance, Level, LevelSpec, ParseColorError};
pub use log_entry::{EntryBody, LogEntry, Record};
pub use message::Message;
