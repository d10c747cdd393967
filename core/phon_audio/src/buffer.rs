use std::time::Duration;

use phon_transport::SampleClock;

/// Multi-channel block of samples ready to be played.
///
/// Stored planar (one `Vec` per channel) so channels can be filled
/// independently; [`AudioBuffer::interleaved`] produces the frame-major
/// layout output devices consume.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: f64,
    frame_count: usize,
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Silent buffer of `channel_count` channels with `frame_count` frames each.
    pub fn new(channel_count: usize, frame_count: usize, sample_rate: f64) -> Self {
        Self {
            sample_rate,
            frame_count,
            channels: vec![vec![0.0; frame_count]; channel_count],
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count == 0 || self.channels.is_empty()
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn channel_mut(&mut self, index: usize) -> Option<&mut [f32]> {
        self.channels.get_mut(index).map(Vec::as_mut_slice)
    }

    pub fn duration(&self) -> Duration {
        frames_duration(self.frame_count, self.sample_rate)
    }

    /// Frame-major copy: `[c0[0], c1[0], .., c0[1], c1[1], ..]`.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut interleave_buffer = Vec::with_capacity(self.frame_count * self.channels.len());
        for frame in 0..self.frame_count {
            for channel in &self.channels {
                interleave_buffer.push(channel[frame]);
            }
        }
        interleave_buffer
    }
}

/// Playing time of `frames` at `sample_rate`; zero when the rate is unusable.
pub(crate) fn frames_duration(frames: usize, sample_rate: f64) -> Duration {
    SampleClock::new(sample_rate).map_or(Duration::ZERO, |clock| clock.duration_of(frames))
}

#[cfg(test)]
mod audio_buffer_tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_silent_with_requested_shape() {
        let buffer = AudioBuffer::new(2, 3, 44100.0);
        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.frame_count(), 3);
        assert_eq!(buffer.channel(0).unwrap(), &[0.0, 0.0, 0.0]);
        assert_eq!(buffer.channel(1).unwrap(), &[0.0, 0.0, 0.0]);
        assert!(buffer.channel(2).is_none());
    }

    #[test]
    fn test_interleaved_alternates_channels_per_frame() {
        let mut buffer = AudioBuffer::new(2, 2, 10.0);
        buffer.channel_mut(0).unwrap().copy_from_slice(&[0.2, 0.3]);
        buffer.channel_mut(1).unwrap().copy_from_slice(&[0.4, 0.6]);

        assert_eq!(buffer.interleaved(), vec![0.2, 0.4, 0.3, 0.6]);
    }

    #[test]
    fn test_mono_interleave_is_identity() {
        let mut buffer = AudioBuffer::new(1, 3, 10.0);
        buffer.channel_mut(0).unwrap().copy_from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(buffer.interleaved(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_empty_buffers() {
        assert!(AudioBuffer::new(2, 0, 10.0).is_empty());
        assert!(AudioBuffer::new(0, 4, 10.0).is_empty());
        assert!(AudioBuffer::new(0, 4, 10.0).interleaved().is_empty());
    }

    #[test]
    fn test_duration_uses_sample_rate() {
        let buffer = AudioBuffer::new(1, 22050, 44100.0);
        assert_eq!(buffer.duration(), Duration::from_millis(500));
    }
}
