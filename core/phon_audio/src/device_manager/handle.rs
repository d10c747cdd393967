use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU8, AtomicUsize, Ordering},
    },
    time::Duration,
};

use uuid::Uuid;

use crate::buffer::frames_duration;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaybackId(String);

impl From<Uuid> for PlaybackId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for PlaybackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a submitted buffer once it has left the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// Handed to the output, no audio rendered yet.
    Submitted,
    Playing,
    Finished,
    Stopped,
}

impl PlaybackStatus {
    const fn as_u8(self) -> u8 {
        match self {
            Self::Submitted => 0,
            Self::Playing => 1,
            Self::Finished => 2,
            Self::Stopped => 3,
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Submitted,
            1 => Self::Playing,
            2 => Self::Finished,
            _ => Self::Stopped,
        }
    }

    pub const fn is_done(self) -> bool {
        matches!(self, Self::Finished | Self::Stopped)
    }
}

/// State shared between a [`PlaybackHandle`] and whatever renders the audio.
#[derive(Debug)]
pub struct PlaybackState {
    status: AtomicU8,
    frames_played: AtomicUsize,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::with_status(PlaybackStatus::Submitted)
    }

    fn with_status(status: PlaybackStatus) -> Self {
        Self {
            status: AtomicU8::new(status.as_u8()),
            frames_played: AtomicUsize::new(0),
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    pub fn is_done(&self) -> bool {
        self.status().is_done()
    }

    pub fn frames_played(&self) -> usize {
        self.frames_played.load(Ordering::Relaxed)
    }

    pub fn set_frames_played(&self, frames: usize) {
        self.frames_played.store(frames, Ordering::Relaxed);
    }

    /// `Submitted -> Playing`. Returns `false` when playback had already
    /// started or ended, which leaves the status untouched.
    pub fn mark_playing(&self) -> bool {
        self.status
            .compare_exchange(
                PlaybackStatus::Submitted.as_u8(),
                PlaybackStatus::Playing.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Moves to `target` unless playback already ended. Returns whether it moved.
    fn end_with(&self, target: PlaybackStatus) -> bool {
        self.status
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (!PlaybackStatus::from_u8(current).is_done()).then_some(target.as_u8())
            })
            .is_ok()
    }

    pub fn finish(&self) -> bool {
        self.end_with(PlaybackStatus::Finished)
    }

    pub fn stop(&self) -> bool {
        self.end_with(PlaybackStatus::Stopped)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

/// Caller-side view of one submitted buffer.
///
/// Dropping the handle does not stop playback.
#[derive(Debug, Clone)]
pub struct PlaybackHandle {
    id: PlaybackId,
    frame_count: usize,
    sample_rate: f64,
    state: Arc<PlaybackState>,
}

impl PlaybackHandle {
    pub fn new(frame_count: usize, sample_rate: f64, state: Arc<PlaybackState>) -> Self {
        Self {
            id: Uuid::new_v4().into(),
            frame_count,
            sample_rate,
            state,
        }
    }

    /// Handle for a request that had nothing to play. Reports `Finished`.
    pub fn noop() -> Self {
        Self::new(
            0,
            0.0,
            Arc::new(PlaybackState::with_status(PlaybackStatus::Finished)),
        )
    }

    pub fn id(&self) -> &PlaybackId {
        &self.id
    }

    pub fn is_noop(&self) -> bool {
        self.frame_count == 0
    }

    pub fn status(&self) -> PlaybackStatus {
        self.state.status()
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn frames_played(&self) -> usize {
        self.state.frames_played()
    }

    pub fn duration(&self) -> Duration {
        frames_duration(self.frame_count, self.sample_rate)
    }

    /// Silences the rest of the buffer. Returns `false` if playback had already ended.
    pub fn stop(&self) -> bool {
        self.state.stop()
    }

    pub(crate) fn finish(&self) -> bool {
        self.state.finish()
    }
}

#[cfg(test)]
mod playback_handle_tests {
    use super::*;

    #[test]
    fn test_noop_handle_is_already_finished() {
        let handle = PlaybackHandle::noop();
        assert!(handle.is_noop());
        assert_eq!(handle.status(), PlaybackStatus::Finished);
        assert_eq!(handle.duration(), Duration::ZERO);
        assert!(!handle.stop());
    }

    #[test]
    fn test_status_progresses_submitted_playing_finished() {
        let state = Arc::new(PlaybackState::new());
        let handle = PlaybackHandle::new(4, 4.0, Arc::clone(&state));
        assert_eq!(handle.status(), PlaybackStatus::Submitted);

        state.mark_playing();
        assert_eq!(handle.status(), PlaybackStatus::Playing);

        assert!(state.finish());
        assert_eq!(handle.status(), PlaybackStatus::Finished);
        assert_eq!(handle.duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_stop_wins_only_while_not_done() {
        let state = Arc::new(PlaybackState::new());
        let handle = PlaybackHandle::new(4, 4.0, Arc::clone(&state));

        assert!(handle.stop());
        assert_eq!(handle.status(), PlaybackStatus::Stopped);

        // a late finish from the renderer must not overwrite the stop
        assert!(!state.finish());
        assert_eq!(handle.status(), PlaybackStatus::Stopped);
    }

    #[test]
    fn test_mark_playing_does_not_revive_ended_playback() {
        let state = PlaybackState::new();
        state.finish();
        assert!(!state.mark_playing());
        assert_eq!(state.status(), PlaybackStatus::Finished);
    }

    #[test]
    fn test_mark_playing_moves_only_from_submitted() {
        let state = PlaybackState::new();
        assert!(state.mark_playing());
        assert!(!state.mark_playing());
        assert_eq!(state.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn test_frames_duration_matches_buffer_duration() {
        let buffer = crate::buffer::AudioBuffer::new(1, 8000, 16000.0);
        assert_eq!(frames_duration(8000, 16000.0), buffer.duration());
        assert_eq!(frames_duration(8000, 0.0), Duration::ZERO);
        assert_eq!(frames_duration(8000, f64::NAN), Duration::ZERO);
    }

    #[test]
    fn test_clones_share_state() {
        let handle = PlaybackHandle::new(10, 10.0, Arc::new(PlaybackState::new()));
        let copy = handle.clone();
        handle.stop();
        assert_eq!(copy.status(), PlaybackStatus::Stopped);
        assert_eq!(copy.id(), handle.id());
    }
}
