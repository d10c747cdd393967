use std::sync::Arc;

use phon_transport::SelectionSpan;

use crate::{
    constants::{DEFAULT_PLAY_THRESHOLD, DEFAULT_SAMPLE_COLUMN, DEFAULT_TIME_COLUMN},
    device_manager::{AudioOutput, handle::PlaybackHandle},
    error::{PlaybackError, SourceError},
    player::AudioPlayer,
    request::PlaybackMode,
    source::SampleSource,
};

/// Shaded region marking the current selection, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionBox {
    pub left: f64,
    pub right: f64,
    pub visible: bool,
}

/// Mono waveform plot with playback of everything, the selection, or the
/// visible x range.
///
/// Playback callbacks skip windows spanning no more than `threshold`
/// samples and return `Ok(None)` for them.
#[derive(Debug, Clone)]
pub struct AudioPlot {
    source: Arc<SampleSource>,
    sample_column: String,
    time_column: String,
    x_range: (f64, f64),
    selected: Vec<usize>,
    selection_box: SelectionBox,
    threshold: usize,
}

impl AudioPlot {
    pub fn new(samples: Vec<f32>, sample_rate: f64) -> Result<Self, SourceError> {
        Self::with_columns(
            samples,
            sample_rate,
            DEFAULT_TIME_COLUMN,
            DEFAULT_SAMPLE_COLUMN,
        )
    }

    /// Plot whose mono channel is named `sample_column` and whose x values
    /// are published as `time_column`.
    pub fn with_columns(
        samples: Vec<f32>,
        sample_rate: f64,
        time_column: impl Into<String>,
        sample_column: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let sample_column = sample_column.into();
        let source = SampleSource::mono(sample_column.as_str(), samples, sample_rate)?;
        let x_range = (0.0, source.duration().as_secs_f64());
        Ok(Self {
            source: Arc::new(source),
            sample_column,
            time_column: time_column.into(),
            x_range,
            selected: Vec::new(),
            selection_box: SelectionBox::default(),
            threshold: DEFAULT_PLAY_THRESHOLD,
        })
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn source(&self) -> &Arc<SampleSource> {
        &self.source
    }

    pub fn sample_column(&self) -> &str {
        &self.sample_column
    }

    pub fn time_column(&self) -> &str {
        &self.time_column
    }

    /// `(times, samples)` pairs for drawing the waveform.
    pub fn waveform(&self) -> Result<(Vec<f32>, &[f32]), PlaybackError> {
        Ok((
            self.source.time_axis(),
            self.source.channel_data(&self.sample_column)?,
        ))
    }

    pub fn x_range(&self) -> (f64, f64) {
        self.x_range
    }

    /// Called when the user zooms or pans.
    pub fn set_x_range(&mut self, start: f64, end: f64) {
        self.x_range = (start, end);
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn selection_box(&self) -> SelectionBox {
        self.selection_box
    }

    /// Replace the selected sample indices and move the selection box over them.
    pub fn select(&mut self, indices: Vec<usize>) {
        match SelectionSpan::from_indices(indices.iter().copied()) {
            Some(span) => {
                let (left, right) = span.bounds_seconds(self.source.clock());
                self.selection_box = SelectionBox {
                    left,
                    right,
                    visible: true,
                };
            }
            None => self.selection_box.visible = false,
        }
        self.selected = indices;
    }

    pub fn play_all<O: AudioOutput>(
        &self,
        player: &mut AudioPlayer<O>,
    ) -> Result<Option<PlaybackHandle>, PlaybackError> {
        if self.source.length() <= self.threshold {
            return Ok(None);
        }
        self.play(player, &PlaybackMode::All)
    }

    pub fn play_selection<O: AudioOutput>(
        &self,
        player: &mut AudioPlayer<O>,
    ) -> Result<Option<PlaybackHandle>, PlaybackError> {
        let mode = PlaybackMode::Selection(self.selected.clone());
        if mode.range(&self.source).len() <= self.threshold {
            log::debug!("Selection too short to play");
            return Ok(None);
        }
        self.play(player, &mode)
    }

    pub fn play_visible<O: AudioOutput>(
        &self,
        player: &mut AudioPlayer<O>,
    ) -> Result<Option<PlaybackHandle>, PlaybackError> {
        let (start, end) = self.x_range;
        let mode = PlaybackMode::Visible { start, end };
        if mode.range(&self.source).len() <= self.threshold {
            log::debug!("Visible range too short to play");
            return Ok(None);
        }
        self.play(player, &mode)
    }

    fn play<O: AudioOutput>(
        &self,
        player: &mut AudioPlayer<O>,
        mode: &PlaybackMode,
    ) -> Result<Option<PlaybackHandle>, PlaybackError> {
        player
            .play_mode(&self.source, mode, [self.sample_column.as_str()])
            .map(Some)
    }
}
