use super::Logger;
use crate::dispatcher::{DispatchReport, Mask};
use crate::domain::{LevelSpec, LogError, Message};

/// A logger that may be absent.
///
/// When absent every call returns an empty report immediately: arguments
/// are not converted, normalized or checked. When present calls are
/// forwarded unchanged.
#[derive(Debug, Clone)]
pub struct OptionalLogger<L> {
    inner: Option<L>,
}

impl<L> OptionalLogger<L> {
    pub fn new(inner: Option<L>) -> Self {
        Self { inner }
    }

    pub fn none() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    pub fn get(&self) -> Option<&L> {
        self.inner.as_ref()
    }

    pub fn into_inner(self) -> Option<L> {
        self.inner
    }
}

impl<L> Default for OptionalLogger<L> {
    fn default() -> Self {
        Self::none()
    }
}

impl<L> From<Option<L>> for OptionalLogger<L> {
    fn from(inner: Option<L>) -> Self {
        Self::new(inner)
    }
}

impl<T: Logger> Logger for OptionalLogger<T> {
    fn enabled(&self) -> bool {
        self.inner.as_ref().is_some_and(T::enabled)
    }

    fn dispatch(
        &self,
        messages: Vec<Message>,
        level: LevelSpec,
        mask: Option<&Mask>,
    ) -> Result<DispatchReport, LogError> {
        match &self.inner {
            Some(logger) => logger.dispatch(messages, level, mask),
            None => Ok(DispatchReport::default()),
        }
    }
}
