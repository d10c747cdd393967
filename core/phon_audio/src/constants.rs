/// Tolerance for comparing rendered samples in tests.
pub const AUDIO_SAMPLE_EPSILON: f32 = 1e-6;

/// Selections and windows must span more than this many samples to be played.
pub const DEFAULT_PLAY_THRESHOLD: usize = 2;

/// Column holding the waveform of a plot.
pub const DEFAULT_SAMPLE_COLUMN: &str = "samples";

/// Column holding the time of each sample, in seconds.
pub const DEFAULT_TIME_COLUMN: &str = "times";
