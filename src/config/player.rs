use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What volume the player returns to when it is unmuted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnmutePolicy {
    /// Restore the last audible volume the user chose before muting.
    #[default]
    Restore,

    /// Always restore the given fixed volume, discarding the prior level.
    Fixed(f64),
}

/// Playback control surface configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Milliseconds of pointer inactivity during playback before the
    /// controls overlay hides.
    pub hide_delay_ms: u64,

    /// How close (in seconds) a position report must be to a pending seek
    /// target before position reports drive the scrub bar again.
    pub seek_tolerance_secs: f64,

    /// Number of disagreeing position reports discarded after a seek before
    /// the pending seek is abandoned.
    pub seek_guard_max_stale_ticks: u32,

    /// Volume applied at mount.
    pub initial_volume: f64,

    /// Interval between position reports of the simulated media element.
    pub tick_interval_ms: u64,

    /// Volume restored by the mute toggle.
    pub unmute_policy: UnmutePolicy,
}

impl PlayerConfig {
    /// Inactivity delay before the controls hide.
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    /// Interval between simulated position reports.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            hide_delay_ms: 3000,
            seek_tolerance_secs: 1.0,
            seek_guard_max_stale_ticks: 8,
            initial_volume: 1.0,
            tick_interval_ms: 250,
            unmute_policy: UnmutePolicy::Restore,
        }
    }
}
