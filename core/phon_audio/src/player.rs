use crate::{
    buffer::AudioBuffer,
    device_manager::{AudioOutput, handle::PlaybackHandle},
    error::PlaybackError,
    request::{PlaybackMode, PlaybackRequest},
    source::SampleSource,
};

/// Slices sample ranges out of a [`SampleSource`] and hands them to an output.
///
/// Every call builds its own buffer, so overlapping requests simply produce
/// overlapping sounds.
#[derive(Debug)]
pub struct AudioPlayer<O: AudioOutput> {
    output: O,
}

impl<O: AudioOutput> AudioPlayer<O> {
    pub fn new(output: O) -> Self {
        Self { output }
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Copy the requested window of each selected channel into a new buffer,
    /// in selection order.
    pub fn build_buffer(request: &PlaybackRequest<'_>) -> Result<AudioBuffer, PlaybackError> {
        let selected = request
            .channels
            .iter()
            .map(|name| request.source.channel_data(name))
            .collect::<Result<Vec<_>, _>>()?;

        let range = request.clamped_range().as_range();
        let mut buffer = AudioBuffer::new(
            selected.len(),
            range.len(),
            request.source.sample_rate(),
        );
        for (i, data) in selected.into_iter().enumerate() {
            if let Some(out) = buffer.channel_mut(i) {
                out.copy_from_slice(&data[range.clone()]);
            }
        }

        log::debug!(
            "Built {} frame buffer from {}..{} of source {} ({:?})",
            buffer.frame_count(),
            range.start,
            range.end,
            request.source.id(),
            request.channels,
        );
        Ok(buffer)
    }

    /// Build the buffer for `request` and submit it for immediate playback.
    ///
    /// Returns once the output has accepted the buffer. Empty ranges and empty
    /// channel selections return [`PlaybackHandle::noop`] without submitting
    /// anything; unknown channel names fail even then.
    pub fn play(&mut self, request: &PlaybackRequest<'_>) -> Result<PlaybackHandle, PlaybackError> {
        if let Some(unknown) = request
            .channels
            .iter()
            .find(|name| !request.source.has_channel(name))
        {
            return Err(PlaybackError::UnknownChannel(unknown.clone()));
        }

        let range = request.clamped_range();
        if range.is_empty() {
            log::debug!("Nothing to play in {range:?}");
            return Ok(PlaybackHandle::noop());
        }
        if request.channels.is_empty() {
            log::warn!("Playback requested without any channels, skipping");
            return Ok(PlaybackHandle::noop());
        }

        let buffer = Self::build_buffer(request)?;
        Ok(self.output.submit(buffer)?)
    }

    /// Resolve `mode` against `source` and play the result.
    pub fn play_mode<I, S>(
        &mut self,
        source: &SampleSource,
        mode: &PlaybackMode,
        channels: I,
    ) -> Result<PlaybackHandle, PlaybackError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = PlaybackRequest::new(source, mode.range(source), channels);
        self.play(&request)
    }
}
