/// Failures reported by the media element or its host container.
///
/// The controller never hands these to its callers. A rejected command is
/// logged and the matching state transition is skipped.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// No media element is mounted, or it is not ready yet
    #[error("Media element unavailable")]
    MediaUnavailable,

    /// The media element refused a command
    #[error("Media element rejected {command}: {reason}")]
    CommandRejected {
        /// Command that was refused
        command: &'static str,
        /// Reason given by the media element
        reason: String,
    },

    /// The host container refused to enter or leave fullscreen
    #[error("Fullscreen request rejected: {0}")]
    FullscreenRejected(String),
}
