/// Shared service building blocks
pub mod common;
/// Video playback control surface
pub mod playback;

pub use playback::{MediaElement, MediaEvent, PlaybackController, PlayerState};
