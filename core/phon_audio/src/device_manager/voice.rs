use std::sync::Arc;

use cpal::{FromSample, Sample};
use rtrb::Consumer;

use crate::device_manager::handle::PlaybackState;

/// Audio-callback side of one submitted buffer.
///
/// Pulls interleaved frames out of the ring and writes them to the device
/// layout. When the device runs at a different rate than the buffer, frames
/// are repeated or skipped according to `step` (buffer frames per device frame).
#[derive(Debug)]
pub struct BufferVoice {
    samples: Consumer<f32>,
    channels: usize,
    step: f64,
    position: f64,
    frames_read: usize,
    frame: Vec<f32>,
    state: Arc<PlaybackState>,
}

impl BufferVoice {
    pub fn new(
        samples: Consumer<f32>,
        channels: usize,
        step: f64,
        state: Arc<PlaybackState>,
    ) -> Self {
        Self {
            samples,
            channels,
            step,
            position: 0.0,
            frames_read: 0,
            frame: vec![0.0; channels],
            state,
        }
    }

    /// Fill `data`, laid out as interleaved frames of `device_channels` samples.
    pub fn render<T>(&mut self, data: &mut [T], device_channels: usize)
    where
        T: Sample + FromSample<f32>,
    {
        if self.state.is_done() || device_channels == 0 {
            data.fill(T::EQUILIBRIUM);
            return;
        }
        self.state.mark_playing();

        let mut frames = data.chunks_mut(device_channels);
        for out_frame in frames.by_ref() {
            let target = self.position as usize;
            let mut exhausted = false;
            while self.frames_read <= target {
                if !self.pull_frame() {
                    exhausted = true;
                    break;
                }
            }
            if exhausted {
                out_frame.fill(T::EQUILIBRIUM);
                self.state.finish();
                break;
            }

            for (d, sample) in out_frame.iter_mut().enumerate() {
                *sample = self.sample_for(d).to_sample::<T>();
            }
            self.position += self.step;
        }

        for rest in frames {
            rest.fill(T::EQUILIBRIUM);
        }
        self.state.set_frames_played(self.frames_read);
    }

    /// Mono fans out to every device channel; surplus device channels stay silent.
    fn sample_for(&self, device_channel: usize) -> f32 {
        if self.channels == 1 {
            self.frame[0]
        } else {
            self.frame.get(device_channel).copied().unwrap_or(0.0)
        }
    }

    fn pull_frame(&mut self) -> bool {
        if self.channels == 0 || self.samples.slots() < self.channels {
            return false;
        }
        for slot in &mut self.frame {
            match self.samples.pop() {
                Ok(value) => *slot = value,
                Err(_) => return false,
            }
        }
        self.frames_read += 1;
        true
    }
}

#[cfg(test)]
mod buffer_voice_tests {
    use rtrb::RingBuffer;

    use super::*;
    use crate::{constants::AUDIO_SAMPLE_EPSILON, device_manager::handle::PlaybackStatus};

    fn voice_for(
        interleaved: &[f32],
        channels: usize,
        step: f64,
    ) -> (BufferVoice, Arc<PlaybackState>) {
        let (mut producer, consumer) = RingBuffer::new(interleaved.len());
        for &sample in interleaved {
            producer.push(sample).unwrap();
        }
        let state = Arc::new(PlaybackState::new());
        (
            BufferVoice::new(consumer, channels, step, Arc::clone(&state)),
            state,
        )
    }

    #[test]
    fn test_stereo_buffer_on_stereo_device_is_copied_verbatim() {
        let (mut voice, state) = voice_for(&[0.1, 0.2, 0.3, 0.4], 2, 1.0);
        let mut out = vec![9.0_f32; 4];

        voice.render(&mut out, 2);

        assert_eq!(out, vec![0.1, 0.2, 0.3, 0.4]);
        assert_eq!(state.status(), PlaybackStatus::Playing);
        assert_eq!(state.frames_played(), 2);
    }

    #[test]
    fn test_finishes_and_pads_with_silence_when_buffer_runs_out() {
        let (mut voice, state) = voice_for(&[0.5, 0.25], 1, 1.0);
        let mut out = vec![9.0_f32; 4];

        voice.render(&mut out, 1);

        assert_eq!(out, vec![0.5, 0.25, 0.0, 0.0]);
        assert_eq!(state.status(), PlaybackStatus::Finished);
    }

    #[test]
    fn test_finish_detected_on_following_callback() {
        let (mut voice, state) = voice_for(&[0.5, 0.25], 1, 1.0);
        let mut out = vec![0.0_f32; 2];

        voice.render(&mut out, 1);
        assert_eq!(state.status(), PlaybackStatus::Playing);

        voice.render(&mut out, 1);
        assert_eq!(out, vec![0.0, 0.0]);
        assert_eq!(state.status(), PlaybackStatus::Finished);
    }

    #[test]
    fn test_mono_buffer_fans_out_to_all_device_channels() {
        let (mut voice, _) = voice_for(&[0.3, 0.6], 1, 1.0);
        let mut out = vec![0.0_f32; 4];

        voice.render(&mut out, 2);

        assert_eq!(out, vec![0.3, 0.3, 0.6, 0.6]);
    }

    #[test]
    fn test_extra_device_channels_are_silent() {
        let (mut voice, _) = voice_for(&[0.1, 0.2], 2, 1.0);
        let mut out = vec![9.0_f32; 4];

        voice.render(&mut out, 4);

        assert_eq!(out, vec![0.1, 0.2, 0.0, 0.0]);
    }

    #[test]
    fn test_half_step_repeats_each_frame() {
        let (mut voice, _) = voice_for(&[0.1, 0.2], 1, 0.5);
        let mut out = vec![0.0_f32; 4];

        voice.render(&mut out, 1);

        assert_eq!(out, vec![0.1, 0.1, 0.2, 0.2]);
    }

    #[test]
    fn test_double_step_skips_every_other_frame() {
        let (mut voice, _) = voice_for(&[0.1, 0.2, 0.3, 0.4], 1, 2.0);
        let mut out = vec![9.0_f32; 3];

        voice.render(&mut out, 1);

        assert!((out[0] - 0.1).abs() < AUDIO_SAMPLE_EPSILON);
        assert!((out[1] - 0.3).abs() < AUDIO_SAMPLE_EPSILON);
        assert_eq!(out[2], 0.0);
    }

    #[test]
    fn test_stopped_voice_renders_silence() {
        let (mut voice, state) = voice_for(&[0.5, 0.5], 1, 1.0);
        state.stop();
        let mut out = vec![9.0_f32; 2];

        voice.render(&mut out, 1);

        assert_eq!(out, vec![0.0, 0.0]);
        assert_eq!(state.status(), PlaybackStatus::Stopped);
    }

    #[test]
    fn test_converts_to_integer_device_formats() {
        let (mut voice, _) = voice_for(&[0.5, -0.5], 1, 1.0);
        let mut out = vec![0_i16; 2];

        voice.render(&mut out, 1);

        assert_eq!(out, vec![16384, -16384]);
    }
}
