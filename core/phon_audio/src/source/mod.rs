pub mod source_id;

use std::time::Duration;

use phon_transport::SampleClock;
use uuid::Uuid;

use crate::{
    error::{PlaybackError, SourceError},
    source::source_id::SourceId,
};

/// One named sequence of decoded samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub name: String,
    pub data: Vec<f32>,
}

/// Immutable set of equal-length sample channels recorded at one sample rate.
///
/// Owned by the widget that displays it; share it with `Arc` when several
/// widgets play the same audio.
///
/// # Example
/// ```
/// use phon_audio::source::SampleSource;
///
/// let source = SampleSource::new(
///     16000.0,
///     [("left", vec![0.0, 0.5]), ("right", vec![0.0, -0.5])],
/// )
/// .unwrap();
/// assert_eq!(source.length(), 2);
/// assert_eq!(source.channel_data("right").unwrap(), &[0.0, -0.5]);
/// ```
#[derive(Debug, Clone)]
pub struct SampleSource {
    id: SourceId,
    clock: SampleClock,
    length: usize,
    channels: Vec<Channel>,
}

impl SampleSource {
    pub fn new<I, N>(sample_rate: f64, channels: I) -> Result<Self, SourceError>
    where
        I: IntoIterator<Item = (N, Vec<f32>)>,
        N: Into<String>,
    {
        let clock =
            SampleClock::new(sample_rate).ok_or(SourceError::InvalidSampleRate(sample_rate))?;

        let mut validated: Vec<Channel> = Vec::new();
        for (name, data) in channels {
            let name = name.into();
            if validated.iter().any(|c| c.name == name) {
                return Err(SourceError::DuplicateChannel(name));
            }
            if let Some(first) = validated.first()
                && first.data.len() != data.len()
            {
                return Err(SourceError::LengthMismatch {
                    name,
                    expected: first.data.len(),
                    found: data.len(),
                });
            }
            validated.push(Channel { name, data });
        }

        let length = validated
            .first()
            .map(|c| c.data.len())
            .ok_or(SourceError::NoChannels)?;
        Ok(Self {
            id: Uuid::new_v4().into(),
            clock,
            length,
            channels: validated,
        })
    }

    /// Single-channel source.
    pub fn mono(
        name: impl Into<String>,
        samples: Vec<f32>,
        sample_rate: f64,
    ) -> Result<Self, SourceError> {
        Self::new(sample_rate, [(name.into(), samples)])
    }

    pub fn id(&self) -> &SourceId {
        &self.id
    }

    /// Number of samples in every channel.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn sample_rate(&self) -> f64 {
        self.clock.sample_rate()
    }

    pub fn clock(&self) -> &SampleClock {
        &self.clock
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Channel names in declaration order.
    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(|c| c.name.as_str())
    }

    pub fn has_channel(&self, name: &str) -> bool {
        self.channels.iter().any(|c| c.name == name)
    }

    pub fn channel_data(&self, name: &str) -> Result<&[f32], PlaybackError> {
        self.channels
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.data.as_slice())
            .ok_or_else(|| PlaybackError::UnknownChannel(name.to_owned()))
    }

    pub fn duration(&self) -> Duration {
        self.clock.duration_of(self.length)
    }

    /// Time in seconds of each sample, for plotting against the channel data.
    pub fn time_axis(&self) -> Vec<f32> {
        self.clock.time_axis(self.length)
    }
}

#[cfg(test)]
mod sample_source_tests {
    use super::*;

    fn stereo() -> SampleSource {
        SampleSource::new(
            10.0,
            [
                ("left", vec![0.0, 0.1, 0.2, 0.3]),
                ("right", vec![1.0, 1.1, 1.2, 1.3]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_accessors_report_shape() {
        let source = stereo();
        assert_eq!(source.length(), 4);
        assert_eq!(source.sample_rate(), 10.0);
        assert_eq!(source.channel_count(), 2);
        assert_eq!(source.channel_names().collect::<Vec<_>>(), ["left", "right"]);
        assert!(source.has_channel("left"));
        assert!(!source.has_channel("center"));
    }

    #[test]
    fn test_channel_data_returns_named_samples() {
        let source = stereo();
        assert_eq!(source.channel_data("right").unwrap(), &[1.0, 1.1, 1.2, 1.3]);
    }

    #[test]
    fn test_unknown_channel_fails() {
        let source = SampleSource::mono("samples", vec![0.0; 10], 10.0).unwrap();
        let result = source.channel_data("left");
        assert!(matches!(result, Err(PlaybackError::UnknownChannel(name)) if name == "left"));
    }

    #[test]
    fn test_invalid_sample_rate_is_rejected() {
        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = SampleSource::mono("samples", vec![0.0], rate);
            assert!(matches!(result, Err(SourceError::InvalidSampleRate(_))));
        }
    }

    #[test]
    fn test_unequal_channel_lengths_are_rejected() {
        let result = SampleSource::new(8000.0, [("a", vec![0.0; 3]), ("b", vec![0.0; 4])]);
        assert_eq!(
            result.unwrap_err(),
            SourceError::LengthMismatch {
                name: "b".to_owned(),
                expected: 3,
                found: 4,
            }
        );
    }

    #[test]
    fn test_duplicate_channel_names_are_rejected() {
        let result = SampleSource::new(8000.0, [("a", vec![0.0]), ("a", vec![1.0])]);
        assert_eq!(
            result.unwrap_err(),
            SourceError::DuplicateChannel("a".to_owned())
        );
    }

    #[test]
    fn test_source_without_channels_is_rejected() {
        let result = SampleSource::new(8000.0, Vec::<(String, Vec<f32>)>::new());
        assert_eq!(result.unwrap_err(), SourceError::NoChannels);
    }

    #[test]
    fn test_channel_of_zero_samples_is_allowed() {
        let source = SampleSource::mono("samples", Vec::new(), 8000.0).unwrap();
        assert_eq!(source.length(), 0);
        assert_eq!(source.channel_count(), 1);
    }

    #[test]
    fn test_duration_and_time_axis_follow_sample_rate() {
        let source = stereo();
        assert_eq!(source.duration(), Duration::from_millis(400));
        assert_eq!(source.time_axis().len(), 4);
        assert!((source.time_axis()[3] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_each_source_gets_its_own_id() {
        assert_ne!(stereo().id(), stereo().id());
    }
}
