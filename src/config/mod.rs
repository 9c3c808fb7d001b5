//! Configuration schema definitions and loading.
//!
//! Defines the complete configuration structure for Reelview: general
//! settings and the playback control surface tuning. All configurations
//! are serializable to/from TOML format.

mod general;
mod loading;
mod paths;
mod player;


pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;
pub use player::{PlayerConfig, UnmutePolicy};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure for Reelview.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Playback control surface settings.
    #[serde(default)]
    pub player: PlayerConfig,
}
