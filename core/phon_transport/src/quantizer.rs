#[derive(Debug, Clone, Copy)]
pub struct Quantizer;

impl Quantizer {
    /// Round to the nearest integer, halves going toward positive infinity.
    ///
    /// `0.5 -> 1`, `2.5 -> 3`, `-0.5 -> 0`, `-1.5 -> -1`.
    pub fn round_half_up(value: f64) -> f64 {
        let floor = value.floor();
        if value - floor >= 0.5 {
            floor + 1.0
        } else {
            floor
        }
    }

    /// Snap a time in seconds to the nearest sample index.
    ///
    /// Non-finite inputs saturate: `+inf` maps to `i64::MAX`, `-inf` to
    /// `i64::MIN` and `NaN` to `0`.
    pub fn seconds_to_index(seconds: f64, sample_rate: f64) -> i64 {
        let position = seconds * sample_rate;
        if position.is_nan() {
            return 0;
        }
        if position.is_infinite() {
            return if position > 0.0 { i64::MAX } else { i64::MIN };
        }
        Self::round_half_up(position) as i64
    }
}
