//! Widget-side callers of the player: the objects a UI event handler holds
//! and triggers.

pub mod button;
pub mod plot;

pub use button::AudioButton;
pub use plot::{AudioPlot, SelectionBox};
