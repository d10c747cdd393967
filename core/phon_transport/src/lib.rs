//! Time and sample-index arithmetic shared by the playback crates.

pub mod clock;
pub mod quantizer;
pub mod range;
pub mod selection;

pub use clock::SampleClock;
pub use range::{PlaybackRange, RangeResolver};
pub use selection::SelectionSpan;
