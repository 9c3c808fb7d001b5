//! Render model for the control overlay.
//!
//! A [`ControlSurface`] is a pure function of a [`PlayerState`]; it holds
//! everything a view needs to draw the overlay and nothing it would need
//! to mutate.

use serde::Serialize;

use super::{ControlsVisibility, PlaybackRate, PlayerState, format_time};

/// Glyph on the play/pause toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayGlyph {
    /// Playback is paused; pressing plays
    Play,
    /// Playback is running; pressing pauses
    Pause,
}

/// Glyph on the mute toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeGlyph {
    /// Audio is audible
    Audible,
    /// Audio is muted or at zero volume
    Muted,
}

/// Glyph on the fullscreen toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FullscreenGlyph {
    /// Pressing enters fullscreen
    Enter,
    /// Pressing leaves fullscreen
    Exit,
}

/// Range input description
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeInput {
    /// Current value
    pub value: f64,
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
    /// Granularity of user input
    pub step: f64,
}

/// One entry of the playback rate menu
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateOption {
    /// Label such as `1.5x`
    pub label: String,
    /// Multiplier applied when chosen
    pub rate: PlaybackRate,
    /// Whether this is the active rate
    pub selected: bool,
}

/// Everything the overlay shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlSurface {
    /// Play/pause toggle
    pub play_button: PlayGlyph,
    /// `elapsed / total` label
    pub time_label: String,
    /// Scrub bar, 0 to 100
    pub scrub_bar: RangeInput,
    /// Mute toggle
    pub mute_button: VolumeGlyph,
    /// Volume slider, 0 to 1
    pub volume_slider: RangeInput,
    /// Playback rate menu
    pub rate_menu: Vec<RateOption>,
    /// Fullscreen toggle
    pub fullscreen_button: FullscreenGlyph,
    /// Overlay opacity, 1 when visible and 0 when hidden
    pub overlay_opacity: f64,
}

impl From<&PlayerState> for ControlSurface {
    fn from(state: &PlayerState) -> Self {
        let rate_menu = PlaybackRate::PRESETS
            .iter()
            .map(|&rate| RateOption {
                label: rate.to_string(),
                rate,
                selected: rate == state.playback_rate,
            })
            .collect();

        Self {
            play_button: if state.is_playing {
                PlayGlyph::Pause
            } else {
                PlayGlyph::Play
            },
            time_label: format!(
                "{} / {}",
                format_time(state.position_seconds),
                format_time(state.duration_seconds)
            ),
            scrub_bar: RangeInput {
                value: state.position_ratio,
                min: 0.0,
                max: 100.0,
                step: 1.0,
            },
            mute_button: if state.audible_volume().is_silent() {
                VolumeGlyph::Muted
            } else {
                VolumeGlyph::Audible
            },
            volume_slider: RangeInput {
                value: *state.volume,
                min: 0.0,
                max: 1.0,
                step: 0.01,
            },
            rate_menu,
            fullscreen_button: if state.is_fullscreen {
                FullscreenGlyph::Exit
            } else {
                FullscreenGlyph::Enter
            },
            overlay_opacity: match state.controls() {
                ControlsVisibility::Visible => 1.0,
                ControlsVisibility::Hidden => 0.0,
            },
        }
    }
}
