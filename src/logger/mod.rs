//! Call surface shared by every logger.
//!
//! Implementors provide `dispatch`; the level shortcuts and masked views are
//! derived from it.

pub mod masked;
pub mod optional;

pub use masked::Masked;
pub use optional::OptionalLogger;

use crate::dispatcher::{DispatchReport, Mask};
use crate::domain::{Level, LevelSpec, LogError, Message};
use std::sync::Arc;

pub trait Logger {
    /// Normalize `messages` at `level` and hand them to the sinks that are
    /// not excluded by `mask` (or the logger's default mask when `None`).
    ///
    /// Errors are returned only for problems with the call itself, before any
    /// sink sees an entry. Sink failures are reported in the `DispatchReport`.
    fn dispatch(
        &self,
        messages: Vec<Message>,
        level: LevelSpec,
        mask: Option<&Mask>,
    ) -> Result<DispatchReport, LogError>;

    /// `false` when calls are discarded outright. The generic entry points
    /// then return an empty report without converting any argument.
    fn enabled(&self) -> bool {
        true
    }

    /// Generic entry point behind every shortcut.
    fn log_masked<I, M, L>(
        &self,
        messages: I,
        level: L,
        mask: Option<&Mask>,
    ) -> Result<DispatchReport, LogError>
    where
        Self: Sized,
        I: IntoIterator<Item = M>,
        M: Into<Message>,
        L: Into<LevelSpec>,
    {
        if !self.enabled() {
            return Ok(DispatchReport::default());
        }
        self.dispatch(collect(messages), level.into(), mask)
    }

    fn log<I, M, L>(&self, messages: I, level: L) -> Result<DispatchReport, LogError>
    where
        Self: Sized,
        I: IntoIterator<Item = M>,
        M: Into<Message>,
        L: Into<LevelSpec>,
    {
        self.log_masked(messages, level, None)
    }

    /// Log without a level. Reaches every unmasked sink.
    fn bare<I, M>(&self, messages: I) -> Result<DispatchReport, LogError>
    where
        Self: Sized,
        I: IntoIterator<Item = M>,
        M: Into<Message>,
    {
        self.log(messages, LevelSpec::Bare)
    }

    fn info<I, M>(&self, messages: I) -> Result<DispatchReport, LogError>
    where
        Self: Sized,
        I: IntoIterator<Item = M>,
        M: Into<Message>,
    {
        self.log(messages, Level::INFO)
    }

    fn warn<I, M>(&self, messages: I) -> Result<DispatchReport, LogError>
    where
        Self: Sized,
        I: IntoIterator<Item = M>,
        M: Into<Message>,
    {
        self.log(messages, Level::WARN)
    }

    /// Alias of [`Logger::warn`].
    fn warning<I, M>(&self, messages: I) -> Result<DispatchReport, LogError>
    where
        Self: Sized,
        I: IntoIterator<Item = M>,
        M: Into<Message>,
    {
        self.warn(messages)
    }

    fn error<I, M>(&self, messages: I) -> Result<DispatchReport, LogError>
    where
        Self: Sized,
        I: IntoIterator<Item = M>,
        M: Into<Message>,
    {
        self.log(messages, Level::ERROR)
    }

    fn debug<I, M>(&self, messages: I) -> Result<DispatchReport, LogError>
    where
        Self: Sized,
        I: IntoIterator<Item = M>,
        M: Into<Message>,
    {
        self.log(messages, Level::DEBUG)
    }

    /// View of this logger that applies `mask` to every call.
    fn masked<'a>(&'a self, mask: &'a Mask) -> Masked<'a, Self>
    where
        Self: Sized,
    {
        Masked::new(self, mask)
    }
}

pub(crate) fn collect<I, M>(messages: I) -> Vec<Message>
where
    I: IntoIterator<Item = M>,
    M: Into<Message>,
{
    messages.into_iter().map(Into::into).collect()
}

impl<L: Logger + ?Sized> Logger for &L {
    fn enabled(&self) -> bool {
        (**self).enabled()
    }

    fn dispatch(
        &self,
        messages: Vec<Message>,
        level: LevelSpec,
        mask: Option<&Mask>,
    ) -> Result<DispatchReport, LogError> {
        (**self).dispatch(messages, level, mask)
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn enabled(&self) -> bool {
        (**self).enabled()
    }

    fn dispatch(
        &self,
        messages: Vec<Message>,
        level: LevelSpec,
        mask: Option<&Mask>,
    ) -> Result<DispatchReport, LogError> {
        (**self).dispatch(messages, level, mask)
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn enabled(&self) -> bool {
        (**self).enabled()
    }

    fn dispatch(
        &self,
        messages: Vec<Message>,
        level: LevelSpec,
        mask: Option<&Mask>,
    ) -> Result<DispatchReport, LogError> {
        (**self).dispatch(messages, level, mask)
    }
}
