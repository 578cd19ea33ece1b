use crate::sink::SinkId;
use std::collections::HashSet;

/// Set of sink identities excluded from one dispatch.
///
/// Masks are a per-call view: applying one never changes which sinks a
/// dispatcher owns or its default mask.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mask {
    ids: HashSet<SinkId>,
}

impl Mask {
    /// An empty mask excludes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<SinkId>) -> Self {
        self.ids.insert(id.into());
        self
    }

    pub fn contains(&self, id: &SinkId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &SinkId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<T: Into<SinkId>> FromIterator<T> for Mask {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
