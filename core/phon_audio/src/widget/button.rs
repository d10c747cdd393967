use std::sync::Arc;

use crate::{
    device_manager::{AudioOutput, handle::PlaybackHandle},
    error::PlaybackError,
    player::AudioPlayer,
    request::PlaybackRequest,
    source::SampleSource,
};

/// A button that plays a time window of its source when clicked.
///
/// By default the whole source is played; narrow it with
/// [`AudioButton::with_window`].
#[derive(Debug, Clone)]
pub struct AudioButton {
    pub label: String,
    source: Arc<SampleSource>,
    channels: Vec<String>,
    /// Seconds, inclusive.
    start: f64,
    /// Seconds, exclusive; `f64::INFINITY` means the end of the source.
    end: f64,
}

impl AudioButton {
    pub fn new<I, S>(source: Arc<SampleSource>, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: String::new(),
            source,
            channels: channels.into_iter().map(Into::into).collect(),
            start: 0.0,
            end: f64::INFINITY,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_window(mut self, start: f64, end: f64) -> Self {
        self.set_window(start, end);
        self
    }

    pub fn set_window(&mut self, start: f64, end: f64) {
        self.start = start;
        self.end = end;
    }

    pub fn window(&self) -> (f64, f64) {
        (self.start, self.end)
    }

    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn source(&self) -> &Arc<SampleSource> {
        &self.source
    }

    /// Replace the audio this button plays, e.g. after loading a new recording.
    pub fn set_source(&mut self, source: Arc<SampleSource>) {
        self.source = source;
    }

    pub fn click<O: AudioOutput>(
        &self,
        player: &mut AudioPlayer<O>,
    ) -> Result<PlaybackHandle, PlaybackError> {
        let request = PlaybackRequest::for_seconds(
            &self.source,
            self.start,
            self.end,
            self.channels.iter().cloned(),
        );
        log::debug!(
            "Button '{}' requests {:?} of {}",
            self.label,
            request.range,
            self.source.id()
        );
        player.play(&request)
    }
}
