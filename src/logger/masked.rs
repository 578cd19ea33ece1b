use super::Logger;
use crate::dispatcher::{DispatchReport, Mask};
use crate::domain::{LevelSpec, LogError, Message};

/// Borrowed view of a logger that excludes the sinks in `mask` from every
/// call made through it. The underlying logger is not modified.
///
/// ```
/// use rask_log_dispatch::{Logger, Mask, MultiLogger, SinkHandle, sink::MemorySink};
///
/// let logger = MultiLogger::new(
///     vec![
///         SinkHandle::new("console", MemorySink::new()),
///         SinkHandle::new("file", MemorySink::new()),
///     ],
///     None,
/// )
/// .unwrap();
///
/// let mask = Mask::new().with("file");
/// let report = logger.masked(&mask).info(["console only"]).unwrap();
/// assert!(report.was_delivered_to("console"));
/// assert!(!report.was_delivered_to("file"));
/// ```
#[derive(Debug)]
pub struct Masked<'a, L: ?Sized> {
    logger: &'a L,
    mask: &'a Mask,
}

impl<'a, L: ?Sized> Masked<'a, L> {
    pub fn new(logger: &'a L, mask: &'a Mask) -> Self {
        Self { logger, mask }
    }

    pub fn mask(&self) -> &Mask {
        self.mask
    }
}

impl<L: ?Sized> Clone for Masked<'_, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L: ?Sized> Copy for Masked<'_, L> {}

impl<L: Logger + ?Sized> Logger for Masked<'_, L> {
    fn enabled(&self) -> bool {
        self.logger.enabled()
    }

    /// An explicit mask passed here still wins over the view's own mask.
    fn dispatch(
        &self,
        messages: Vec<Message>,
        level: LevelSpec,
        mask: Option<&Mask>,
    ) -> Result<DispatchReport, LogError> {
        self.logger
            .dispatch(messages, level, Some(mask.unwrap_or(self.mask)))
    }
}
