use crate::sink::{SinkError, SinkId};
use thiserror::Error;

/// One sink failing to accept an entry during a dispatch.
#[derive(Error, Debug)]
#[error("Sink '{sink}' failed on entry {entry_index}: {source}")]
pub struct SinkDeliveryError {
    pub sink: SinkId,
    pub entry_index: usize,
    #[source]
    pub source: SinkError,
}

/// Every sink failure of one dispatch, in sink order.
#[derive(Error, Debug)]
#[error("{} sink(s) failed to deliver: {}", .0.len(), summarize(.0.iter().map(|f| &f.sink)))]
pub struct DeliveryErrors(pub Vec<SinkDeliveryError>);

fn summarize<'a>(sinks: impl Iterator<Item = &'a SinkId>) -> String {
    sinks.map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// One sink failing to flush. No entry is involved.
#[derive(Error, Debug)]
#[error("Sink '{sink}' failed to flush: {source}")]
pub struct SinkFlushError {
    pub sink: SinkId,
    #[source]
    pub source: SinkError,
}

#[derive(Error, Debug)]
#[error("{} sink(s) failed to flush: {}", .0.len(), summarize(.0.iter().map(|f| &f.sink)))]
pub struct FlushErrors(pub Vec<SinkFlushError>);

/// Outcome of one dispatch.
///
/// Every sink of the dispatcher appears in exactly one of `delivered`,
/// `masked`, `filtered` or `failures`, in insertion order.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Number of normalized entries the call produced.
    pub entries: usize,
    pub delivered: Vec<SinkId>,
    pub masked: Vec<SinkId>,
    /// Skipped because the level is below the sink's minimum importance.
    pub filtered: Vec<SinkId>,
    pub failures: Vec<SinkDeliveryError>,
}

impl DispatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn was_delivered_to(&self, id: &str) -> bool {
        self.delivered.iter().any(|sink| sink.as_str() == id)
    }

    /// Turn sink failures into an error, for callers that want `?`.
    pub fn into_result(self) -> Result<Self, DeliveryErrors> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(DeliveryErrors(self.failures))
        }
    }
}
