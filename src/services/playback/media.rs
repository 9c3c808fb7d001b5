use super::{PlaybackError, PlaybackRate, Volume};

/// The playable resource a controller drives.
///
/// Commands are fire-and-forget requests. Their effects arrive later as
/// [`MediaEvent`] notifications rather than as return values; the `Result`
/// only reports whether the element accepted the request.
pub trait MediaElement: Send + Sync {
    /// Start or resume playback.
    ///
    /// # Errors
    /// Returns `PlaybackError` if the element refuses to start.
    fn play(&self) -> Result<(), PlaybackError>;

    /// Pause playback.
    ///
    /// # Errors
    /// Returns `PlaybackError` if the element refuses to pause.
    fn pause(&self) -> Result<(), PlaybackError>;

    /// Jump to an absolute position in seconds.
    ///
    /// # Errors
    /// Returns `PlaybackError` if the element cannot seek.
    fn seek_to(&self, seconds: f64) -> Result<(), PlaybackError>;

    /// Set output volume.
    ///
    /// # Errors
    /// Returns `PlaybackError` if the element rejects the volume.
    fn set_volume(&self, volume: Volume) -> Result<(), PlaybackError>;

    /// Set the mute flag.
    ///
    /// # Errors
    /// Returns `PlaybackError` if the element rejects the change.
    fn set_muted(&self, muted: bool) -> Result<(), PlaybackError>;

    /// Set the speed multiplier.
    ///
    /// # Errors
    /// Returns `PlaybackError` if the element rejects the rate.
    fn set_playback_rate(&self, rate: PlaybackRate) -> Result<(), PlaybackError>;
}

/// Screen region the player renders into.
///
/// Requests may be refused by the platform; the outcome is reported later
/// through [`MediaEvent::FullscreenChanged`].
pub trait HostContainer: Send + Sync {
    /// Ask the platform to make the container fullscreen.
    ///
    /// # Errors
    /// Returns `PlaybackError::FullscreenRejected` if refused outright.
    fn request_fullscreen(&self) -> Result<(), PlaybackError>;

    /// Ask the platform to leave fullscreen.
    ///
    /// # Errors
    /// Returns `PlaybackError::FullscreenRejected` if refused outright.
    fn exit_fullscreen(&self) -> Result<(), PlaybackError>;
}

/// Notifications emitted by the media element and its container
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// Playback position advanced or jumped
    PositionChanged {
        /// Current position in seconds
        current: f64,
        /// Total duration in seconds as known to the element
        duration: f64,
    },

    /// Stream metadata is available
    MetadataLoaded {
        /// Total duration in seconds
        duration: f64,
    },

    /// The container entered or left fullscreen
    FullscreenChanged(bool),

    /// Playback reached the end of the stream
    Ended,
}
