use crate::{
    clock::SampleClock,
    range::{PlaybackRange, RangeResolver},
};

/// Extent of a set of selected sample indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSpan {
    first: usize,
    last: usize,
}

impl SelectionSpan {
    /// Smallest and largest index of the selection, `None` if nothing is selected.
    pub fn from_indices<I>(indices: I) -> Option<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        indices.into_iter().fold(None, |span, index| {
            Some(match span {
                None => Self {
                    first: index,
                    last: index,
                },
                Some(Self { first, last }) => Self {
                    first: first.min(index),
                    last: last.max(index),
                },
            })
        })
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn last(&self) -> usize {
        self.last
    }

    pub fn span(&self) -> usize {
        self.last - self.first
    }

    pub fn exceeds(&self, threshold: usize) -> bool {
        self.span() > threshold
    }

    /// Playback window `first..last`; the last selected index is excluded.
    pub fn to_range(&self, length: usize) -> PlaybackRange {
        RangeResolver::resolve_indices(self.first, self.last, length)
    }

    /// Left and right edges of the selection in seconds.
    pub fn bounds_seconds(&self, clock: &SampleClock) -> (f64, f64) {
        (
            clock.index_to_seconds(self.first),
            clock.index_to_seconds(self.last),
        )
    }
}
