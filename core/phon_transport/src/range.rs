use std::ops::Range;

use crate::quantizer::Quantizer;

/// Half-open window `start..end` of sample indices.
///
/// Always satisfies `start <= end`. Whoever builds the range is responsible
/// for clamping `end` to the length of the data it indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlaybackRange {
    start: usize,
    end: usize,
}

impl PlaybackRange {
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    /// An out-of-order pair collapses onto `end`, giving an empty range.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<PlaybackRange> for Range<usize> {
    fn from(value: PlaybackRange) -> Self {
        value.as_range()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RangeResolver;

impl RangeResolver {
    /// Translate a time window in seconds into a sample window over data of
    /// `length` samples.
    ///
    /// The start is only floor-clamped at zero and the end is only clamped to
    /// `length`; `end_seconds` may be `f64::INFINITY` to mean "to the end".
    /// Windows that end up inverted become empty instead of failing.
    pub fn resolve(
        start_seconds: f64,
        end_seconds: f64,
        length: usize,
        sample_rate: f64,
    ) -> PlaybackRange {
        let start = Quantizer::seconds_to_index(start_seconds, sample_rate).max(0);
        let end = Quantizer::seconds_to_index(end_seconds, sample_rate).max(0);
        Self::clamp(start as u64, end as u64, length)
    }

    /// Same boundary policy as [`RangeResolver::resolve`], for callers that
    /// already work in sample indices.
    pub fn resolve_indices(start: usize, end: usize, length: usize) -> PlaybackRange {
        Self::clamp(start as u64, end as u64, length)
    }

    fn clamp(start: u64, end: u64, length: usize) -> PlaybackRange {
        let end = end.min(length as u64) as usize;
        let start = start.min(end as u64) as usize;
        PlaybackRange::new(start, end)
    }
}

#[cfg(test)]
mod playback_range_tests {
    use super::*;

    #[test]
    fn test_new_collapses_inverted_pair() {
        let range = PlaybackRange::new(7, 3);
        assert_eq!((range.start(), range.end()), (3, 3));
        assert!(range.is_empty());
    }

    #[test]
    fn test_len_and_as_range() {
        let range = PlaybackRange::new(2, 6);
        assert_eq!(range.len(), 4);
        assert_eq!(range.as_range(), 2..6);
        assert_eq!(Range::from(range), 2..6);
        assert!(PlaybackRange::EMPTY.is_empty());
    }
}
