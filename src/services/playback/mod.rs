//! Playback control surface.
//!
//! A [`PlaybackController`] owns the state of a single video player: play
//! state, scrub position, volume and mute, playback rate, fullscreen, and
//! the auto-hiding control overlay. It talks to the outside world only
//! through the [`MediaElement`] and [`HostContainer`] traits and the
//! [`MediaEvent`] notifications they produce.

mod auto_hide;
/// Playback controller
pub mod controller;
/// Collaborator failures
pub mod error;
/// Media element and host container contracts
pub mod media;
mod seek_guard;
/// In-memory media element
pub mod simulated;
/// Reactive player properties
pub mod state;
/// Control overlay render model
pub mod surface;
/// Time label formatting
pub mod time;
/// Volume, rate, and state snapshot types
pub mod types;

#[cfg(test)]
mod tests;

pub use controller::PlaybackController;
pub use error::PlaybackError;
pub use media::{HostContainer, MediaElement, MediaEvent};
pub use simulated::{MediaCommand, SimulatedMedia};
pub use state::PlayerProperties;
pub use surface::{ControlSurface, FullscreenGlyph, PlayGlyph, RangeInput, RateOption, VolumeGlyph};
pub use time::format_time;
pub use types::{ControlsVisibility, PlaybackRate, PlayerState, Volume};
