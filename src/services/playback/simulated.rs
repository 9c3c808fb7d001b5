//! In-memory media element for demos and tests.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use futures::{Stream, StreamExt};
use tokio::{runtime::Handle, sync::broadcast, task::JoinHandle};
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, warn};

use super::{HostContainer, MediaElement, MediaEvent, PlaybackError, PlaybackRate, Volume};

/// A command received by [`SimulatedMedia`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaCommand {
    /// `play()`
    Play,
    /// `pause()`
    Pause,
    /// `seek_to(seconds)`
    SeekTo(f64),
    /// `set_volume(volume)`
    SetVolume(Volume),
    /// `set_muted(muted)`
    SetMuted(bool),
    /// `set_playback_rate(rate)`
    SetPlaybackRate(PlaybackRate),
    /// `request_fullscreen()`
    RequestFullscreen,
    /// `exit_fullscreen()`
    ExitFullscreen,
}

#[derive(Debug)]
struct SimState {
    position: f64,
    duration: f64,
    volume: Volume,
    muted: bool,
    rate: PlaybackRate,
    playing: bool,
    fullscreen: bool,
    fullscreen_allowed: bool,
    rejecting: bool,
    commands: Vec<MediaCommand>,
}

/// Media element and host container backed by plain state.
///
/// Records every command it receives. While playing, a tokio task advances
/// the position every tick interval (scaled by the playback rate) and
/// publishes [`MediaEvent::PositionChanged`]; reaching the end publishes
/// [`MediaEvent::Ended`].
#[derive(Debug)]
pub struct SimulatedMedia {
    state: Arc<Mutex<SimState>>,
    events: broadcast::Sender<MediaEvent>,
    tick_interval: Duration,
    driver: Mutex<Option<JoinHandle<()>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SimulatedMedia {
    /// Create a paused element holding a stream of `duration` seconds.
    pub fn new(duration: f64, tick_interval: Duration) -> Self {
        let (events, _) = broadcast::channel(256);

        Self {
            state: Arc::new(Mutex::new(SimState {
                position: 0.0,
                duration: if duration.is_finite() {
                    duration.max(0.0)
                } else {
                    0.0
                },
                volume: Volume::FULL,
                muted: false,
                rate: PlaybackRate::NORMAL,
                playing: false,
                fullscreen: false,
                fullscreen_allowed: true,
                rejecting: false,
                commands: Vec::new(),
            })),
            events,
            tick_interval,
            driver: Mutex::new(None),
        }
    }

    /// Stream of notifications published from now on.
    pub fn events(&self) -> impl Stream<Item = MediaEvent> + Send + 'static {
        BroadcastStream::new(self.events.subscribe()).filter_map(|event| async move {
            match event {
                Ok(event) => Some(event),
                Err(error) => {
                    warn!(%error, "Simulated media notifications lagged");
                    None
                }
            }
        })
    }

    /// Publish a notification as if the element had produced it.
    pub fn emit(&self, event: MediaEvent) {
        let _ = self.events.send(event);
    }

    /// Publish the metadata notification for the loaded stream.
    pub fn load_metadata(&self) {
        let duration = lock(&self.state).duration;
        self.emit(MediaEvent::MetadataLoaded { duration });
    }

    /// Every command received so far, in order.
    pub fn commands(&self) -> Vec<MediaCommand> {
        lock(&self.state).commands.clone()
    }

    /// Current position in seconds.
    pub fn position(&self) -> f64 {
        lock(&self.state).position
    }

    /// Whether the element is advancing.
    pub fn is_playing(&self) -> bool {
        lock(&self.state).playing
    }

    /// Volume the element would output, accounting for mute.
    pub fn audible_volume(&self) -> Volume {
        let state = lock(&self.state);
        if state.muted { Volume::MUTED } else { state.volume }
    }

    /// Whether the container is fullscreen.
    pub fn is_fullscreen(&self) -> bool {
        lock(&self.state).fullscreen
    }

    /// Allow or refuse fullscreen requests, like a platform that requires
    /// a user gesture or permission.
    pub fn set_fullscreen_allowed(&self, allowed: bool) {
        lock(&self.state).fullscreen_allowed = allowed;
    }

    /// Make every media command fail until switched back.
    pub fn set_rejecting(&self, rejecting: bool) {
        lock(&self.state).rejecting = rejecting;
    }

    fn record(&self, command: MediaCommand) -> Result<MutexGuard<'_, SimState>, PlaybackError> {
        let mut state = lock(&self.state);
        state.commands.push(command);

        if state.rejecting {
            return Err(PlaybackError::CommandRejected {
                command: command_name(command),
                reason: "simulated rejection".to_string(),
            });
        }

        Ok(state)
    }

    fn start_driver(&self) {
        let mut driver = lock(&self.driver);
        if driver.as_ref().is_some_and(|task| !task.is_finished()) {
            return;
        }

        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime available; simulated position will not advance");
            return;
        };

        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let tick_interval = self.tick_interval;

        *driver = Some(runtime.spawn(async move {
            let mut interval = tokio::time::interval(tick_interval);
            interval.tick().await;

            loop {
                interval.tick().await;

                let (event, finished) = {
                    let mut state = lock(&state);
                    if !state.playing {
                        continue;
                    }

                    state.position += tick_interval.as_secs_f64() * *state.rate;
                    let finished = state.position >= state.duration;
                    if finished {
                        state.position = state.duration;
                        state.playing = false;
                    }

                    (
                        MediaEvent::PositionChanged {
                            current: state.position,
                            duration: state.duration,
                        },
                        finished,
                    )
                };

                let _ = events.send(event);
                if finished {
                    debug!("Simulated stream reached the end");
                    let _ = events.send(MediaEvent::Ended);
                    break;
                }
            }
        }));
    }
}

fn command_name(command: MediaCommand) -> &'static str {
    match command {
        MediaCommand::Play => "play",
        MediaCommand::Pause => "pause",
        MediaCommand::SeekTo(_) => "seek_to",
        MediaCommand::SetVolume(_) => "set_volume",
        MediaCommand::SetMuted(_) => "set_muted",
        MediaCommand::SetPlaybackRate(_) => "set_playback_rate",
        MediaCommand::RequestFullscreen => "request_fullscreen",
        MediaCommand::ExitFullscreen => "exit_fullscreen",
    }
}

impl MediaElement for SimulatedMedia {
    fn play(&self) -> Result<(), PlaybackError> {
        {
            let mut state = self.record(MediaCommand::Play)?;
            if state.position >= state.duration {
                state.position = 0.0;
            }
            state.playing = true;
        }
        self.start_driver();
        Ok(())
    }

    fn pause(&self) -> Result<(), PlaybackError> {
        self.record(MediaCommand::Pause)?.playing = false;
        Ok(())
    }

    fn seek_to(&self, seconds: f64) -> Result<(), PlaybackError> {
        let mut state = self.record(MediaCommand::SeekTo(seconds))?;
        if state.duration <= 0.0 {
            return Err(PlaybackError::MediaUnavailable);
        }
        state.position = seconds.clamp(0.0, state.duration);
        Ok(())
    }

    fn set_volume(&self, volume: Volume) -> Result<(), PlaybackError> {
        self.record(MediaCommand::SetVolume(volume))?.volume = volume;
        Ok(())
    }

    fn set_muted(&self, muted: bool) -> Result<(), PlaybackError> {
        self.record(MediaCommand::SetMuted(muted))?.muted = muted;
        Ok(())
    }

    fn set_playback_rate(&self, rate: PlaybackRate) -> Result<(), PlaybackError> {
        self.record(MediaCommand::SetPlaybackRate(rate))?.rate = rate;
        Ok(())
    }
}

impl HostContainer for SimulatedMedia {
    fn request_fullscreen(&self) -> Result<(), PlaybackError> {
        self.change_fullscreen(MediaCommand::RequestFullscreen, true)
    }

    fn exit_fullscreen(&self) -> Result<(), PlaybackError> {
        self.change_fullscreen(MediaCommand::ExitFullscreen, false)
    }
}

impl SimulatedMedia {
    fn change_fullscreen(
        &self,
        command: MediaCommand,
        fullscreen: bool,
    ) -> Result<(), PlaybackError> {
        {
            let mut state = lock(&self.state);
            state.commands.push(command);
            if !state.fullscreen_allowed {
                return Err(PlaybackError::FullscreenRejected(
                    "permission denied".to_string(),
                ));
            }
            state.fullscreen = fullscreen;
        }

        self.emit(MediaEvent::FullscreenChanged(fullscreen));
        Ok(())
    }
}

impl Drop for SimulatedMedia {
    fn drop(&mut self) {
        if let Some(task) = lock(&self.driver).take() {
            task.abort();
        }
    }
}
