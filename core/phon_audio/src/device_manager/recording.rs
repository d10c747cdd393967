use std::sync::Arc;

use crate::{
    buffer::AudioBuffer,
    device_manager::{
        AudioDeviceError, AudioOutput,
        handle::{PlaybackHandle, PlaybackState},
    },
};

/// Output that keeps every submitted buffer instead of playing it.
///
/// Handles stay `Submitted` until [`RecordingOutput::finish_all`] is called.
#[derive(Debug, Default)]
pub struct RecordingOutput {
    submissions: Vec<AudioBuffer>,
    handles: Vec<PlaybackHandle>,
    failure: Option<AudioDeviceError>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output whose every submission fails with `error`.
    pub fn failing(error: AudioDeviceError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn submissions(&self) -> &[AudioBuffer] {
        &self.submissions
    }

    pub fn last(&self) -> Option<&AudioBuffer> {
        self.submissions.last()
    }

    /// Marks every handed-out playback as finished.
    pub fn finish_all(&self) {
        for handle in &self.handles {
            handle.finish();
        }
    }
}

impl AudioOutput for RecordingOutput {
    fn submit(&mut self, buffer: AudioBuffer) -> Result<PlaybackHandle, AudioDeviceError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let handle = PlaybackHandle::new(
            buffer.frame_count(),
            buffer.sample_rate(),
            Arc::new(PlaybackState::new()),
        );
        self.handles.push(handle.clone());
        self.submissions.push(buffer);
        Ok(handle)
    }
}
