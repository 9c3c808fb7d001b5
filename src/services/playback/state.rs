use futures::Stream;

use super::{PlaybackRate, PlayerState, Volume};
use crate::{services::common::Property, watch_snapshot};

/// Reactive view of a controller's state.
///
/// Each field can be watched on its own for fine-grained rendering, or
/// [`PlayerProperties::watch`] can be used to receive whole snapshots.
#[derive(Debug, Clone)]
pub struct PlayerProperties {
    /// True only while the media element is advancing
    pub is_playing: Property<bool>,

    /// Playback progress as a percentage, 0 to 100
    pub position_ratio: Property<f64>,

    /// Last reported or sought position in seconds
    pub position_seconds: Property<f64>,

    /// Total duration in seconds, 0 until metadata has loaded
    pub duration_seconds: Property<f64>,

    /// Current volume
    pub volume: Property<Volume>,

    /// Most recent non-zero volume
    pub last_audible_volume: Property<Volume>,

    /// Whether audio is muted
    pub is_muted: Property<bool>,

    /// Current speed multiplier
    pub playback_rate: Property<PlaybackRate>,

    /// Whether the container is fullscreen
    pub is_fullscreen: Property<bool>,

    /// Whether the control overlay is shown
    pub controls_visible: Property<bool>,
}

impl PlayerProperties {
    pub(crate) fn new(initial: PlayerState) -> Self {
        Self {
            is_playing: Property::new(initial.is_playing),
            position_ratio: Property::new(initial.position_ratio),
            position_seconds: Property::new(initial.position_seconds),
            duration_seconds: Property::new(initial.duration_seconds),
            volume: Property::new(initial.volume),
            last_audible_volume: Property::new(initial.last_audible_volume),
            is_muted: Property::new(initial.is_muted),
            playback_rate: Property::new(initial.playback_rate),
            is_fullscreen: Property::new(initial.is_fullscreen),
            controls_visible: Property::new(initial.controls_visible),
        }
    }

    /// Current values of every property.
    pub fn snapshot(&self) -> PlayerState {
        PlayerState {
            is_playing: self.is_playing.get(),
            position_ratio: self.position_ratio.get(),
            position_seconds: self.position_seconds.get(),
            duration_seconds: self.duration_seconds.get(),
            volume: self.volume.get(),
            last_audible_volume: self.last_audible_volume.get(),
            is_muted: self.is_muted.get(),
            playback_rate: self.playback_rate.get(),
            is_fullscreen: self.is_fullscreen.get(),
            controls_visible: self.controls_visible.get(),
        }
    }

    /// Stream of snapshots, emitted whenever any property changes.
    pub fn watch(&self) -> impl Stream<Item = PlayerState> + Send + '_ {
        watch_snapshot!(
            self,
            snapshot,
            is_playing,
            position_ratio,
            position_seconds,
            duration_seconds,
            volume,
            last_audible_volume,
            is_muted,
            playback_rate,
            is_fullscreen,
            controls_visible,
        )
    }
}
