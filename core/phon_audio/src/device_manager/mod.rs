use thiserror::Error;

use crate::{buffer::AudioBuffer, device_manager::handle::PlaybackHandle};

pub mod cpal_dm;
pub mod handle;
pub mod recording;
pub mod voice;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioDeviceError {
    #[error("no audio output device found")]
    DeviceNotFound,
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to build output stream: {0}")]
    StreamBuildFailed(String),
    #[error("failed to start output stream: {0}")]
    StreamStartFailed(String),
}

/// Where finished buffers go to be heard.
///
/// `submit` must return as soon as the buffer is handed over; playback
/// itself continues asynchronously.
pub trait AudioOutput {
    fn submit(&mut self, buffer: AudioBuffer) -> Result<PlaybackHandle, AudioDeviceError>;
}

/// Output device selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Exact device name; `None` picks the host's default output.
    pub device_name: Option<String>,
}

impl OutputConfig {
    pub fn with_device_name(mut self, name: impl Into<String>) -> Self {
        self.device_name = Some(name.into());
        self
    }
}
