//! Dispatcher
//!
//! `MultiLogger` owns an ordered list of sinks and fans every call out to
//! the ones that are neither masked nor above the call's level. Sink
//! failures are isolated per sink and collected in the returned report.

pub mod mask;
pub mod report;

pub use mask::Mask;
pub use report::{
    DeliveryErrors, DispatchReport, FlushErrors, SinkDeliveryError, SinkFlushError,
};

use crate::domain::{LevelSpec, LogEntry, LogError, Message};
use crate::logger::Logger;
use crate::normalizer::MessageNormalizer;
use crate::registry::LevelRegistry;
use crate::sink::{SinkError, SinkHandle, SinkId, panic_message};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::thread;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Sink id '{id}' is used more than once")]
    DuplicateSink { id: SinkId },

    #[error("Default mask names unknown sink '{id}'")]
    UnknownMaskedSink { id: SinkId },
}

/// How surviving sinks are invoked within one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// One sink after the other, in insertion order.
    #[default]
    Sequential,
    /// Each sink on its own scoped thread; the call returns when all finish.
    Concurrent,
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchMode::Sequential => f.write_str("sequential"),
            DispatchMode::Concurrent => f.write_str("concurrent"),
        }
    }
}

impl FromStr for DispatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" => Ok(DispatchMode::Sequential),
            "concurrent" => Ok(DispatchMode::Concurrent),
            other => Err(format!(
                "'{other}' is not a dispatch mode. Valid values: sequential, concurrent"
            )),
        }
    }
}

type DeliveryOutcome = Result<(), (usize, SinkError)>;

/// Fan-out logger over a fixed, ordered set of sinks.
pub struct MultiLogger {
    sinks: Vec<SinkHandle>,
    default_mask: Mask,
    registry: Arc<LevelRegistry>,
    normalizer: MessageNormalizer,
    mode: DispatchMode,
}

impl MultiLogger {
    /// Sequential logger over `sinks` using the process-wide level registry.
    pub fn new(sinks: Vec<SinkHandle>, default_mask: Option<Mask>) -> Result<Self, BuildError> {
        Self::builder()
            .sinks(sinks)
            .default_mask(default_mask.unwrap_or_default())
            .build()
    }

    pub fn builder() -> MultiLoggerBuilder {
        MultiLoggerBuilder::default()
    }

    /// Sink identities in dispatch order.
    pub fn sink_ids(&self) -> impl Iterator<Item = &SinkId> {
        self.sinks.iter().map(SinkHandle::id)
    }

    pub fn default_mask(&self) -> &Mask {
        &self.default_mask
    }

    pub fn registry(&self) -> &Arc<LevelRegistry> {
        &self.registry
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Flush every sink, masked or not, collecting failures.
    pub fn flush(&self) -> Result<(), FlushErrors> {
        let failures: Vec<SinkFlushError> = self
            .sinks
            .iter()
            .filter_map(|handle| {
                handle.sink().flush().err().map(|source| SinkFlushError {
                    sink: handle.id().clone(),
                    source,
                })
            })
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(FlushErrors(failures))
        }
    }

    fn deliver(&self, targets: &[&SinkHandle], entries: &[LogEntry]) -> Vec<DeliveryOutcome> {
        match self.mode {
            DispatchMode::Concurrent if targets.len() > 1 => {
                deliver_concurrently(targets, entries)
            }
            _ => targets
                .iter()
                .map(|handle| handle.deliver(entries))
                .collect(),
        }
    }
}

fn deliver_concurrently(targets: &[&SinkHandle], entries: &[LogEntry]) -> Vec<DeliveryOutcome> {
    thread::scope(|scope| {
        let workers: Vec<_> = targets
            .iter()
            .map(|handle| scope.spawn(move || handle.deliver(entries)))
            .collect();

        // Joined in spawn order so outcomes line up with `targets`.
        workers
            .into_iter()
            .map(|worker| {
                worker
                    .join()
                    .unwrap_or_else(|payload| Err((0, SinkError::Panicked(panic_message(&*payload)))))
            })
            .collect()
    })
}

impl Logger for MultiLogger {
    fn dispatch(
        &self,
        messages: Vec<Message>,
        level: LevelSpec,
        mask: Option<&Mask>,
    ) -> Result<DispatchReport, LogError> {
        // Both steps may fail; nothing has been delivered yet when they do.
        let level = self.registry.resolve(&level)?;
        let entries = self.normalizer.normalize(messages, level.as_ref())?;

        let mask = mask.unwrap_or(&self.default_mask);
        let mut report = DispatchReport {
            entries: entries.len(),
            ..DispatchReport::default()
        };

        let mut targets = Vec::with_capacity(self.sinks.len());
        for handle in &self.sinks {
            if mask.contains(handle.id()) {
                report.masked.push(handle.id().clone());
            } else if !handle.accepts(level.as_ref()) {
                report.filtered.push(handle.id().clone());
            } else {
                targets.push(handle);
            }
        }

        let outcomes = self.deliver(&targets, &entries);
        for (handle, outcome) in targets.iter().zip(outcomes) {
            match outcome {
                Ok(()) => report.delivered.push(handle.id().clone()),
                Err((entry_index, source)) => {
                    warn!(
                        sink = %handle.id(),
                        entry_index,
                        error = %source,
                        "Sink failed to accept log entry"
                    );
                    report.failures.push(SinkDeliveryError {
                        sink: handle.id().clone(),
                        entry_index,
                        source,
                    });
                }
            }
        }

        debug!(
            log_level = level.as_ref().map_or("-", |l| l.name()),
            entries = report.entries,
            delivered = report.delivered.len(),
            masked = report.masked.len(),
            filtered = report.filtered.len(),
            failed = report.failures.len(),
            "Dispatched log call"
        );

        Ok(report)
    }
}

impl fmt::Debug for MultiLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiLogger")
            .field("sinks", &self.sinks)
            .field("default_mask", &self.default_mask)
            .field("normalizer", &self.normalizer)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct MultiLoggerBuilder {
    sinks: Vec<SinkHandle>,
    default_mask: Mask,
    registry: Option<Arc<LevelRegistry>>,
    normalizer: MessageNormalizer,
    mode: DispatchMode,
}

impl MultiLoggerBuilder {
    pub fn sink(mut self, handle: SinkHandle) -> Self {
        self.sinks.push(handle);
        self
    }

    pub fn sinks(mut self, handles: impl IntoIterator<Item = SinkHandle>) -> Self {
        self.sinks.extend(handles);
        self
    }

    pub fn default_mask(mut self, mask: Mask) -> Self {
        self.default_mask = mask;
        self
    }

    /// Use an isolated registry instead of the process-wide one.
    pub fn registry(mut self, registry: Arc<LevelRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn normalizer(mut self, normalizer: MessageNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn separator(self, separator: impl Into<String>) -> Self {
        self.normalizer(MessageNormalizer::with_separator(separator))
    }

    pub fn mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn build(self) -> Result<MultiLogger, BuildError> {
        let mut seen = HashSet::with_capacity(self.sinks.len());
        for handle in &self.sinks {
            if !seen.insert(handle.id().clone()) {
                return Err(BuildError::DuplicateSink {
                    id: handle.id().clone(),
                });
            }
        }

        if let Some(unknown) = self.default_mask.ids().find(|id| !seen.contains(*id)) {
            return Err(BuildError::UnknownMaskedSink {
                id: unknown.clone(),
            });
        }

        Ok(MultiLogger {
            sinks: self.sinks,
            default_mask: self.default_mask,
            registry: self.registry.unwrap_or_else(LevelRegistry::global),
            normalizer: self.normalizer,
            mode: self.mode,
        })
    }
}
