use std::time::Duration;

use crate::quantizer::Quantizer;

/// Converts between the time domain (seconds) and the sample-index domain
/// for a signal sampled at a fixed rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleClock {
    sample_rate: f64,
}

impl SampleClock {
    /// Returns `None` unless `sample_rate` is finite and positive.
    pub fn new(sample_rate: f64) -> Option<Self> {
        (sample_rate.is_finite() && sample_rate > 0.0).then_some(Self { sample_rate })
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Nearest sample index for `seconds`, see [`Quantizer::seconds_to_index`].
    pub fn seconds_to_index(&self, seconds: f64) -> i64 {
        Quantizer::seconds_to_index(seconds, self.sample_rate)
    }

    pub fn index_to_seconds(&self, index: usize) -> f64 {
        index as f64 / self.sample_rate
    }

    pub fn duration_of(&self, frames: usize) -> Duration {
        Duration::from_secs_f64(self.index_to_seconds(frames))
    }

    /// Time in seconds of every sample index in `0..len`, as plotted on the x axis.
    pub fn time_axis(&self, len: usize) -> Vec<f32> {
        (0..len).map(|i| self.index_to_seconds(i) as f32).collect()
    }
}

#[cfg(test)]
mod sample_clock_tests {
    use super::*;

    const SAMPLE_RATE: f64 = 44100.0;

    #[test]
    fn test_rejects_non_positive_or_non_finite_rates() {
        assert!(SampleClock::new(0.0).is_none());
        assert!(SampleClock::new(-8000.0).is_none());
        assert!(SampleClock::new(f64::NAN).is_none());
        assert!(SampleClock::new(f64::INFINITY).is_none());
        assert!(SampleClock::new(SAMPLE_RATE).is_some());
    }

    #[test]
    fn test_seconds_to_index_rounds_to_nearest_sample() {
        let clock = SampleClock::new(SAMPLE_RATE).unwrap();
        assert_eq!(clock.seconds_to_index(0.5), 22050);
        assert_eq!(clock.seconds_to_index(-1.0), -44100);
    }

    #[test]
    fn test_index_to_seconds_divides_by_rate() {
        let clock = SampleClock::new(10.0).unwrap();
        assert!((clock.index_to_seconds(5) - 0.5).abs() < 1e-12);
        assert_eq!(clock.index_to_seconds(0), 0.0);
    }

    #[test]
    fn test_duration_of_frames() {
        let clock = SampleClock::new(SAMPLE_RATE).unwrap();
        assert_eq!(clock.duration_of(44100), Duration::from_secs(1));
        assert_eq!(clock.duration_of(0), Duration::ZERO);
    }

    #[test]
    fn test_time_axis_has_one_entry_per_sample() {
        let clock = SampleClock::new(4.0).unwrap();
        assert_eq!(clock.time_axis(5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(clock.time_axis(0).is_empty());
    }
}
