use std::f32::consts::PI;

/// Sine oscillator used to synthesize test signals.
#[derive(Debug, Clone, Copy)]
pub struct SineWave {
    freq: f32,
    sample_rate: f32,
    amplitude: f32,
    phase: f32,
}

impl SineWave {
    pub fn new(freq: f32, sample_rate: f32, amplitude: f32) -> Self {
        Self {
            freq,
            sample_rate,
            amplitude,
            phase: 0.0,
        }
    }

    /// Next `count` samples, continuing from the previous call.
    pub fn take(&mut self, count: usize) -> Vec<f32> {
        let phase_increment = 2.0 * PI * self.freq / self.sample_rate;

        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            samples.push(self.amplitude * self.phase.sin());
            self.phase += phase_increment;
            if self.phase >= 2.0 * PI {
                self.phase -= 2.0 * PI;
            }
        }
        samples
    }
}
