#![deny(rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::missing_errors_doc,      // Error variants are documented on the enums
    clippy::missing_panics_doc,      // Library code does not panic
    clippy::module_name_repetitions, // e.g. SinkError in sink module
    clippy::must_use_candidate,      // Annotated selectively on critical APIs
    clippy::doc_markdown
)]

//! Pluggable logging façade for long-running jobs.
//!
//! Calls are normalized into [`LogEntry`] values and fanned out by a
//! [`MultiLogger`] to every [`Sink`] that is neither masked for the call nor
//! configured with a higher minimum importance than the call's [`Level`].

pub mod app;
pub mod dispatcher;
pub mod domain;
pub mod logger;
pub mod normalizer;
pub mod registry;
pub mod sink;

// Re-export main types for easy access
pub use dispatcher::{
    BuildError, DeliveryErrors, DispatchMode, DispatchReport, FlushErrors, Mask, MultiLogger,
    MultiLoggerBuilder, SinkDeliveryError, SinkFlushError,
};
pub use domain::{Color, EntryBody, Level, LevelSpec, LogEntry, LogError, Message, Record};
pub use logger::{Logger, Masked, OptionalLogger};
pub use normalizer::{MessageNormalizer, NormalizeError};
pub use registry::{
    DuplicatePolicy, LevelRegistry, RegistryError, RegistryPolicy, UnknownLevelPolicy,
    register_level,
};
pub use serde_json::Value;
pub use sink::{Sink, SinkError, SinkHandle, SinkId};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
