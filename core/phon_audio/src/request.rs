use phon_transport::{PlaybackRange, RangeResolver, SelectionSpan};

use crate::source::SampleSource;

/// Everything the player needs for one playback: what, which part, which channels.
#[derive(Debug, Clone)]
pub struct PlaybackRequest<'a> {
    pub source: &'a SampleSource,
    pub range: PlaybackRange,
    /// Output channel `i` plays the source channel named at position `i`.
    pub channels: Vec<String>,
}

impl<'a> PlaybackRequest<'a> {
    pub fn new<I, S>(source: &'a SampleSource, range: PlaybackRange, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source,
            range,
            channels: channels.into_iter().map(Into::into).collect(),
        }
    }

    /// Request for the time window `start..end` in seconds, resolved against `source`.
    pub fn for_seconds<I, S>(source: &'a SampleSource, start: f64, end: f64, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let range = RangeResolver::resolve(start, end, source.length(), source.sample_rate());
        Self::new(source, range, channels)
    }

    /// `range` restricted to the source's data.
    pub fn clamped_range(&self) -> PlaybackRange {
        RangeResolver::resolve_indices(self.range.start(), self.range.end(), self.source.length())
    }

    pub fn frame_count(&self) -> usize {
        self.clamped_range().len()
    }
}

/// The ways a widget asks for audio.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackMode {
    /// The whole source.
    All,
    /// From the smallest to the largest selected sample index.
    Selection(Vec<usize>),
    /// A time window in seconds, typically the displayed x range.
    Visible { start: f64, end: f64 },
}

impl PlaybackMode {
    /// Sample window this mode covers in `source`. Minimum-length guards are
    /// left to the calling widget.
    pub fn range(&self, source: &SampleSource) -> PlaybackRange {
        match self {
            Self::All => {
                RangeResolver::resolve(0.0, f64::INFINITY, source.length(), source.sample_rate())
            }
            Self::Selection(indices) => SelectionSpan::from_indices(indices.iter().copied())
                .map_or(PlaybackRange::EMPTY, |span| span.to_range(source.length())),
            Self::Visible { start, end } => {
                RangeResolver::resolve(*start, *end, source.length(), source.sample_rate())
            }
        }
    }
}
