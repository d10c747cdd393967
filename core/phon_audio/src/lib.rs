//! Slice-and-play audio for phonetics widgets.
//!
//! A [`SampleSource`] holds decoded channels, a [`PlaybackRequest`] names a
//! sample window and the channels to hear, and an [`AudioPlayer`] copies that
//! window into an [`AudioBuffer`] and submits it to an injected
//! [`AudioOutput`].

pub mod buffer;
pub mod constants;
pub mod device_manager;
pub mod error;
pub mod player;
pub mod request;
pub mod source;
pub mod widget;

pub use buffer::AudioBuffer;
pub use device_manager::{
    AudioDeviceError, AudioOutput, OutputConfig,
    cpal_dm::CpalAudioOutput,
    handle::{PlaybackHandle, PlaybackStatus},
    recording::RecordingOutput,
};
pub use error::{PlaybackError, SourceError};
pub use phon_transport::{PlaybackRange, RangeResolver};
pub use player::AudioPlayer;
pub use request::{PlaybackMode, PlaybackRequest};
pub use source::SampleSource;
