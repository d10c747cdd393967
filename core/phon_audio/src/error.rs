use thiserror::Error;

use crate::device_manager::AudioDeviceError;

/// Problems with the data handed to [`SampleSource::new`](crate::source::SampleSource::new).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    #[error("sample rate must be finite and positive, got {0}")]
    InvalidSampleRate(f64),

    #[error("channel '{name}' has {found} samples, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("channel '{0}' is defined more than once")]
    DuplicateChannel(String),

    #[error("a sample source needs at least one channel")]
    NoChannels,
}

#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("unknown channel '{0}'")]
    UnknownChannel(String),

    #[error("audio output unavailable: {0}")]
    DeviceUnavailable(#[from] AudioDeviceError),
}
