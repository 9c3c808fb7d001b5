use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::{Stream, StreamExt};
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, info, instrument, trace, warn};

use super::{
    ControlSurface, HostContainer, MediaElement, MediaEvent, PlaybackError, PlaybackRate,
    PlayerProperties, PlayerState, Volume, auto_hide::HideTimer, seek_guard::SeekGuard,
};
use crate::config::{PlayerConfig, UnmutePolicy};

/// Logs a rejected collaborator command and reports whether it was accepted.
fn accepted(command: &'static str, result: Result<(), PlaybackError>) -> bool {
    match result {
        Ok(()) => true,
        Err(error) => {
            warn!(command, %error, "Playback command rejected");
            false
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn position_ratio(current: f64, duration: f64) -> f64 {
    if duration > 0.0 {
        (current / duration * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

struct ControllerCore {
    config: PlayerConfig,
    media: Option<Arc<dyn MediaElement>>,
    container: Option<Arc<dyn HostContainer>>,
    properties: PlayerProperties,
    seek_guard: Mutex<SeekGuard>,
    hide_timer: HideTimer,
}

impl ControllerCore {
    fn seek_guard(&self) -> MutexGuard<'_, SeekGuard> {
        self.seek_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn media(&self, operation: &'static str) -> Option<&Arc<dyn MediaElement>> {
        if self.media.is_none() {
            debug!(operation, "No media element mounted; ignoring");
        }
        self.media.as_ref()
    }

    /// Restarts the hide countdown.
    fn arm_hide(&self) {
        let controls_visible = self.properties.controls_visible.clone();
        self.hide_timer.arm(move || controls_visible.set(false));
    }

    /// Shows the overlay and restarts auto-hide if playing.
    ///
    /// The timer is rescheduled before the overlay is shown, so a hide task
    /// that already woke up cannot hide it again right after.
    fn reveal_controls(&self) {
        if self.properties.is_playing.get() {
            self.arm_hide();
        } else {
            self.hide_timer.cancel();
        }

        self.properties.controls_visible.set(true);
    }

    fn pointer_left(&self) {
        if !self.properties.is_playing.get() {
            self.reveal_controls();
        } else if self.properties.controls_visible.get() {
            self.arm_hide();
        }
    }

    fn position_tick(&self, current: f64, duration: f64) {
        let current = non_negative(current);
        let duration = non_negative(duration);

        if !self.seek_guard().admit(current) {
            return;
        }

        trace!(current, duration, "Position tick");
        self.properties.position_seconds.set(current);
        self.properties
            .position_ratio
            .set(position_ratio(current, duration));
    }

    fn metadata_loaded(&self, duration: f64) {
        let duration = non_negative(duration);
        debug!(duration, "Metadata loaded");
        self.properties.duration_seconds.set(duration);
    }

    fn fullscreen_changed(&self, fullscreen: bool) {
        debug!(fullscreen, "Container fullscreen changed");
        self.properties.is_fullscreen.set(fullscreen);
    }

    fn ended(&self) {
        debug!("Playback ended");
        self.properties.is_playing.set(false);
        self.seek_guard().clear();
        self.reveal_controls();
    }

    fn handle(&self, event: MediaEvent) {
        match event {
            MediaEvent::PositionChanged { current, duration } => {
                self.position_tick(current, duration)
            }
            MediaEvent::MetadataLoaded { duration } => self.metadata_loaded(duration),
            MediaEvent::FullscreenChanged(fullscreen) => self.fullscreen_changed(fullscreen),
            MediaEvent::Ended => self.ended(),
        }
    }

    fn restored_volume(&self) -> Volume {
        let restored = match self.config.unmute_policy {
            UnmutePolicy::Restore => self.properties.last_audible_volume.get(),
            UnmutePolicy::Fixed(volume) => Volume::new(volume),
        };

        if restored.is_silent() {
            Volume::FULL
        } else {
            restored
        }
    }
}

/// Owns the player state and mediates between user input, the media
/// element and the control overlay.
///
/// User intents (`toggle_play`, `seek`, ...) issue commands to the media
/// element and update state optimistically. Notifications from the element
/// arrive through [`handle`](Self::handle), the `on_*` methods, or a stream
/// passed to [`monitor`](Self::monitor).
///
/// Every operation tolerates a missing media element or container by doing
/// nothing. Dropping the controller cancels the auto-hide timer and stops
/// monitoring.
pub struct PlaybackController {
    core: Arc<ControllerCore>,
    monitor: Mutex<Option<JoinHandle<()>>>,
}

impl PlaybackController {
    /// Mount a controller on a media element and its host container.
    ///
    /// The configured initial volume is applied to both the state and the
    /// media element.
    #[instrument(skip_all)]
    pub fn mount(
        config: PlayerConfig,
        media: Option<Arc<dyn MediaElement>>,
        container: Option<Arc<dyn HostContainer>>,
    ) -> Self {
        let volume = Volume::new(config.initial_volume);
        let initial = PlayerState {
            volume,
            last_audible_volume: if volume.is_silent() {
                Volume::FULL
            } else {
                volume
            },
            is_muted: volume.is_silent(),
            ..PlayerState::default()
        };

        if let Some(media) = media.as_ref() {
            accepted("set_volume", media.set_volume(volume));
        }

        info!(
            has_media = media.is_some(),
            has_container = container.is_some(),
            "Mounting playback controller"
        );

        let core = ControllerCore {
            seek_guard: Mutex::new(SeekGuard::new(
                config.seek_tolerance_secs,
                config.seek_guard_max_stale_ticks,
            )),
            hide_timer: HideTimer::new(config.hide_delay()),
            properties: PlayerProperties::new(initial),
            config,
            media,
            container,
        };

        Self {
            core: Arc::new(core),
            monitor: Mutex::new(None),
        }
    }

    /// Reactive properties for rendering.
    pub fn properties(&self) -> &PlayerProperties {
        &self.core.properties
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PlayerState {
        self.core.properties.snapshot()
    }

    /// Render model of the control overlay for the current state.
    pub fn surface(&self) -> ControlSurface {
        ControlSurface::from(&self.state())
    }

    /// Whether the auto-hide timer is currently scheduled.
    pub fn hide_pending(&self) -> bool {
        self.core.hide_timer.is_armed()
    }

    /// Whether position reports are being held back by a recent seek.
    pub fn seek_pending(&self) -> bool {
        self.core.seek_guard().is_pending()
    }

    /// Play if paused, pause if playing. Always shows the controls.
    #[instrument(skip(self))]
    pub fn toggle_play(&self) {
        let Some(media) = self.core.media("toggle_play") else {
            return;
        };
        let properties = &self.core.properties;

        if properties.is_playing.get() {
            if accepted("pause", media.pause()) {
                properties.is_playing.set(false);
            }
        } else if accepted("play", media.play()) {
            properties.is_playing.set(true);
        }

        debug!(playing = properties.is_playing.get(), "Toggled playback");
        self.core.reveal_controls();
    }

    /// Jump to `ratio` percent of the duration.
    ///
    /// The scrub bar moves to the requested ratio immediately. Position
    /// reports are then held back until one confirms the new position.
    /// Out-of-range ratios are clamped; nothing happens while the duration
    /// is unknown.
    #[instrument(skip(self))]
    pub fn seek(&self, ratio: f64) {
        let Some(media) = self.core.media("seek") else {
            return;
        };
        let properties = &self.core.properties;

        let duration = properties.duration_seconds.get();
        if duration <= 0.0 {
            debug!("Duration unknown; ignoring seek");
            return;
        }

        let ratio = if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 100.0)
        };
        let target = ratio / 100.0 * duration;

        if !accepted("seek_to", media.seek_to(target)) {
            return;
        }

        self.core.seek_guard().begin(target);
        properties.position_seconds.set(target);
        properties.position_ratio.set(ratio);
        debug!(ratio, target, "Seek requested");
    }

    /// Set the volume. Zero volume and mute are the same state.
    #[instrument(skip(self))]
    pub fn set_volume(&self, volume: f64) {
        let Some(media) = self.core.media("set_volume") else {
            return;
        };
        let properties = &self.core.properties;

        let volume = Volume::new(volume);
        if !accepted("set_volume", media.set_volume(volume)) {
            return;
        }

        let muted = volume.is_silent();
        if muted != properties.is_muted.get() {
            accepted("set_muted", media.set_muted(muted));
        }

        properties.volume.set(volume);
        properties.is_muted.set(muted);
        if !muted {
            properties.last_audible_volume.set(volume);
        }
    }

    /// Mute, or unmute according to the configured [`UnmutePolicy`].
    #[instrument(skip(self))]
    pub fn toggle_mute(&self) {
        let Some(media) = self.core.media("toggle_mute") else {
            return;
        };
        let properties = &self.core.properties;

        if properties.is_muted.get() {
            let restored = self.core.restored_volume();
            if !(accepted("set_muted", media.set_muted(false))
                && accepted("set_volume", media.set_volume(restored)))
            {
                return;
            }

            properties.is_muted.set(false);
            properties.volume.set(restored);
            properties.last_audible_volume.set(restored);
            debug!(volume = *restored, "Unmuted");
        } else {
            if !(accepted("set_muted", media.set_muted(true))
                && accepted("set_volume", media.set_volume(Volume::MUTED)))
            {
                return;
            }

            properties.is_muted.set(true);
            properties.volume.set(Volume::MUTED);
            debug!("Muted");
        }
    }

    /// Set the playback speed multiplier.
    #[instrument(skip(self))]
    pub fn set_playback_rate(&self, rate: f64) {
        let Some(media) = self.core.media("set_playback_rate") else {
            return;
        };

        let rate = PlaybackRate::new(rate);
        if accepted("set_playback_rate", media.set_playback_rate(rate)) {
            self.core.properties.playback_rate.set(rate);
        }
    }

    /// Ask the container to enter or leave fullscreen.
    ///
    /// The fullscreen flag is not changed here; it follows the container's
    /// [`MediaEvent::FullscreenChanged`] notifications.
    #[instrument(skip(self))]
    pub fn toggle_fullscreen(&self) {
        let Some(container) = self.core.container.as_ref() else {
            debug!("No host container mounted; ignoring fullscreen toggle");
            return;
        };

        if self.core.properties.is_fullscreen.get() {
            accepted("exit_fullscreen", container.exit_fullscreen());
        } else {
            accepted("request_fullscreen", container.request_fullscreen());
        }
    }

    /// Pointer moved within the player.
    pub fn note_activity(&self) {
        trace!("Pointer activity");
        self.core.reveal_controls();
    }

    /// Pointer left the player.
    ///
    /// While paused the controls are shown. While playing the overlay keeps
    /// its visibility: a visible overlay restarts its hide countdown from
    /// now, a hidden one stays hidden.
    pub fn pointer_left(&self) {
        trace!("Pointer left");
        self.core.pointer_left();
    }

    /// Position notification from the media element.
    pub fn on_position_tick(&self, current: f64, duration: f64) {
        self.core.position_tick(current, duration);
    }

    /// Metadata notification from the media element. Later values win.
    pub fn on_metadata_loaded(&self, duration: f64) {
        self.core.metadata_loaded(duration);
    }

    /// Fullscreen notification from the host container.
    pub fn on_fullscreen_change(&self, fullscreen: bool) {
        self.core.fullscreen_changed(fullscreen);
    }

    /// End-of-stream notification from the media element.
    pub fn on_ended(&self) {
        self.core.ended();
    }

    /// Dispatch a single notification.
    pub fn handle(&self, event: MediaEvent) {
        self.core.handle(event);
    }

    /// Consume notifications from `events` on a background task.
    ///
    /// Replaces any previous monitoring task. Does nothing outside a tokio
    /// runtime.
    pub fn monitor<S>(&self, events: S)
    where
        S: Stream<Item = MediaEvent> + Send + 'static,
    {
        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime available; media notifications not monitored");
            return;
        };

        let core = Arc::clone(&self.core);
        let task = runtime.spawn(async move {
            let mut events = Box::pin(events);
            while let Some(event) = events.next().await {
                core.handle(event);
            }
            debug!("Media notification stream closed");
        });

        if let Some(previous) = self.monitor_slot().replace(task) {
            previous.abort();
        }
    }

    fn monitor_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.monitor.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Release the hide timer and stop monitoring.
    ///
    /// Also performed on drop.
    pub fn unmount(&self) {
        self.core.hide_timer.cancel();
        if let Some(task) = self.monitor_slot().take() {
            task.abort();
        }
        debug!("Playback controller unmounted");
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.unmount();
    }
}
