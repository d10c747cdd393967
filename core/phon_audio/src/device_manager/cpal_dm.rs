use std::{fmt, sync::Arc};

use cpal::{
    OutputCallbackInfo, SampleFormat, SampleRate, StreamConfig, SupportedStreamConfig,
    SupportedStreamConfigRange,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use rtrb::RingBuffer;

use super::AudioOutput;
use crate::{
    buffer::AudioBuffer,
    device_manager::{
        AudioDeviceError, OutputConfig,
        handle::{PlaybackHandle, PlaybackState},
        voice::BufferVoice,
    },
};

struct ActiveStream {
    _stream: cpal::Stream,
    state: Arc<PlaybackState>,
}

/// Plays each submitted buffer on its own cpal output stream.
///
/// Streams are kept alive here until they finish or are stopped, and are
/// released on the next submission. Dropping the output silences anything
/// still playing.
pub struct CpalAudioOutput {
    config: OutputConfig,
    active: Vec<ActiveStream>,
}

impl CpalAudioOutput {
    pub fn new() -> Self {
        Self::with_config(OutputConfig::default())
    }

    pub fn with_config(config: OutputConfig) -> Self {
        Self {
            config,
            active: Vec::new(),
        }
    }

    /// Streams that have not finished or been stopped yet.
    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|a| !a.state.is_done()).count()
    }

    fn release_finished(&mut self) {
        self.active.retain(|a| !a.state.is_done());
    }

    fn find_device(&self, host: &cpal::Host) -> Result<cpal::Device, AudioDeviceError> {
        match &self.config.device_name {
            None => host
                .default_output_device()
                .ok_or(AudioDeviceError::DeviceNotFound),
            Some(name) => host
                .output_devices()
                .map_err(|_| AudioDeviceError::DeviceNotFound)?
                .find(|device| device.name().is_ok_and(|n| n == *name))
                .ok_or(AudioDeviceError::DeviceNotFound),
        }
    }

    /// The best configuration the device offers at the buffer's rate, the
    /// device default if it cannot play that rate at all.
    fn choose_config(
        device: &cpal::Device,
        channels: u16,
        sample_rate: u32,
    ) -> Result<SupportedStreamConfig, AudioDeviceError> {
        let ranked = device
            .supported_output_configs()
            .ok()
            .and_then(|ranges| best_config(ranges, channels, sample_rate));

        match ranked {
            Some(config) => Ok(config),
            None => {
                log::debug!("No output config at {sample_rate} Hz, using device default");
                device
                    .default_output_config()
                    .map_err(|e| AudioDeviceError::UnsupportedFormat(e.to_string()))
            }
        }
    }

    fn build_output_stream<T>(
        device: &cpal::Device,
        config: &StreamConfig,
        mut voice: BufferVoice,
    ) -> Result<cpal::Stream, AudioDeviceError>
    where
        T: cpal::SizedSample + cpal::FromSample<f32>,
    {
        let error_cb = move |err| {
            log::error!("Stream error: {err}");
        };

        let device_channels = config.channels as usize;
        let data_cb = move |data: &mut [T], _: &OutputCallbackInfo| {
            voice.render(data, device_channels);
        };

        device
            .build_output_stream(config, data_cb, error_cb, None)
            .map_err(|e| AudioDeviceError::StreamBuildFailed(e.to_string()))
    }
}

impl Default for CpalAudioOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CpalAudioOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CpalAudioOutput")
            .field("config", &self.config)
            .field("active", &self.active.len())
            .finish()
    }
}

impl AudioOutput for CpalAudioOutput {
    fn submit(&mut self, buffer: AudioBuffer) -> Result<PlaybackHandle, AudioDeviceError> {
        self.release_finished();
        if buffer.is_empty() {
            return Ok(PlaybackHandle::noop());
        }

        let channels = u16::try_from(buffer.channel_count()).map_err(|_| {
            AudioDeviceError::UnsupportedFormat(format!(
                "{} channels exceed the device limit",
                buffer.channel_count()
            ))
        })?;
        let sample_rate = buffer.sample_rate().round() as u32;

        let host = cpal::default_host();
        let device = self.find_device(&host)?;
        let supported = Self::choose_config(&device, channels, sample_rate)?;
        let format = supported.sample_format();
        let stream_config = supported.config();

        let samples = buffer.interleaved();
        let (mut producer, consumer) = RingBuffer::new(samples.len());
        producer
            .write_chunk_uninit(samples.len())
            .map_err(|e| AudioDeviceError::StreamBuildFailed(e.to_string()))?
            .fill_from_iter(samples);

        let state = Arc::new(PlaybackState::new());
        let step = buffer.sample_rate() / f64::from(stream_config.sample_rate.0);
        let voice = BufferVoice::new(
            consumer,
            buffer.channel_count(),
            step,
            Arc::clone(&state),
        );

        let stream = match format {
            SampleFormat::F32 => Self::build_output_stream::<f32>(&device, &stream_config, voice)?,
            SampleFormat::I16 => Self::build_output_stream::<i16>(&device, &stream_config, voice)?,
            SampleFormat::U16 => Self::build_output_stream::<u16>(&device, &stream_config, voice)?,
            format => {
                return Err(AudioDeviceError::UnsupportedFormat(format!(
                    "Unsupported sample format '{format}'"
                )));
            }
        };

        stream
            .play()
            .map_err(|e| AudioDeviceError::StreamStartFailed(e.to_string()))?;

        log::info!(
            "Playing {} frames x {} channels at {} Hz (device {} ch @ {} Hz)",
            buffer.frame_count(),
            buffer.channel_count(),
            buffer.sample_rate(),
            stream_config.channels,
            stream_config.sample_rate.0,
        );

        self.active.push(ActiveStream {
            _stream: stream,
            state: Arc::clone(&state),
        });
        Ok(PlaybackHandle::new(
            buffer.frame_count(),
            buffer.sample_rate(),
            state,
        ))
    }
}

/// Picks among `ranges` the one to open at `sample_rate`.
///
/// Only ranges covering the rate with a renderable format qualify. An exact
/// channel count wins over the smallest wider layout, which wins over any
/// narrower one; ties go to the preferred sample format.
fn best_config<I>(ranges: I, channels: u16, sample_rate: u32) -> Option<SupportedStreamConfig>
where
    I: IntoIterator<Item = SupportedStreamConfigRange>,
{
    ranges
        .into_iter()
        .filter(|range| {
            range.min_sample_rate().0 <= sample_rate && sample_rate <= range.max_sample_rate().0
        })
        .filter_map(|range| {
            let rank = format_rank(range.sample_format())?;
            let key = (
                range.channels() != channels,
                range.channels() < channels,
                range.channels().abs_diff(channels),
                rank,
            );
            Some((key, range))
        })
        .min_by_key(|(key, _)| *key)
        .map(|(_, range)| range.with_sample_rate(SampleRate(sample_rate)))
}

/// Preference order among the formats the voice can render.
fn format_rank(format: SampleFormat) -> Option<u8> {
    match format {
        SampleFormat::F32 => Some(0),
        SampleFormat::I16 => Some(1),
        SampleFormat::U16 => Some(2),
        _ => None,
    }
}
