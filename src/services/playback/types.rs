use std::{fmt, ops::Deref};

use serde::Serialize;

/// Audio volume with automatic clamping
///
/// Volume range: 0.0 (silent) to 1.0 (full). Non-finite input is
/// treated as silent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Volume(f64);

impl Volume {
    /// Silent volume (0.0)
    pub const MUTED: Volume = Volume(0.0);

    /// Full volume (1.0)
    pub const FULL: Volume = Volume(1.0);

    /// Create a new volume, clamped to 0.0..=1.0.
    pub fn new(volume: f64) -> Self {
        if volume.is_finite() {
            Self(volume.clamp(0.0, 1.0))
        } else {
            Self::MUTED
        }
    }

    /// Check if the volume is at 0.0
    pub fn is_silent(&self) -> bool {
        self.0 == 0.0
    }

    /// Get volume as percentage (1.0 = 100%)
    pub fn as_percentage(&self) -> f64 {
        self.0 * 100.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::FULL
    }
}

impl Deref for Volume {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Playback speed multiplier.
///
/// The rate menu offers [`PlaybackRate::PRESETS`], but any finite positive
/// multiplier is accepted. Anything else falls back to normal speed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PlaybackRate(f64);

impl PlaybackRate {
    /// Normal speed
    pub const NORMAL: PlaybackRate = PlaybackRate(1.0);

    /// Rates offered by the rate menu, in display order
    pub const PRESETS: [PlaybackRate; 4] = [
        PlaybackRate(0.5),
        PlaybackRate(1.0),
        PlaybackRate(1.5),
        PlaybackRate(2.0),
    ];

    /// Create a playback rate.
    pub fn new(rate: f64) -> Self {
        if rate.is_finite() && rate > 0.0 {
            Self(rate)
        } else {
            Self::NORMAL
        }
    }

    /// Whether this rate is one of the menu presets
    pub fn is_preset(&self) -> bool {
        Self::PRESETS.contains(self)
    }
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl Deref for PlaybackRate {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// Visibility of the control overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControlsVisibility {
    /// Overlay fully opaque
    Visible,

    /// Overlay faded out after inactivity during playback
    Hidden,
}

impl From<bool> for ControlsVisibility {
    fn from(visible: bool) -> Self {
        if visible { Self::Visible } else { Self::Hidden }
    }
}

/// Snapshot of everything the playback controller tracks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerState {
    /// True only while the media element is advancing
    pub is_playing: bool,

    /// Playback progress as a percentage of the duration, 0 to 100
    pub position_ratio: f64,

    /// Last reported or sought position in seconds
    pub position_seconds: f64,

    /// Total duration in seconds, 0 until metadata has loaded
    pub duration_seconds: f64,

    /// Current volume; 0 while muted
    pub volume: Volume,

    /// Most recent non-zero volume, restored when unmuting
    pub last_audible_volume: Volume,

    /// Whether audio is muted
    pub is_muted: bool,

    /// Current speed multiplier
    pub playback_rate: PlaybackRate,

    /// Whether the host container is fullscreen, as last reported by it
    pub is_fullscreen: bool,

    /// Whether the control overlay is shown
    pub controls_visible: bool,
}

impl PlayerState {
    /// State of the auto-hide state machine
    pub fn controls(&self) -> ControlsVisibility {
        ControlsVisibility::from(self.controls_visible)
    }

    /// Volume that actually reaches the speakers, silent while muted
    pub fn audible_volume(&self) -> Volume {
        if self.is_muted { Volume::MUTED } else { self.volume }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            is_playing: false,
            position_ratio: 0.0,
            position_seconds: 0.0,
            duration_seconds: 0.0,
            volume: Volume::FULL,
            last_audible_volume: Volume::FULL,
            is_muted: false,
            playback_rate: PlaybackRate::NORMAL,
            is_fullscreen: false,
            controls_visible: true,
        }
    }
}
