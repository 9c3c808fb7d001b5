//! Behavioural tests for the playback controller.
//!
//! Timer tests run on a paused tokio clock so elapsed time is exact.

#![allow(clippy::panic)]

use std::{sync::Arc, time::Duration};

use futures::StreamExt;
use tokio::time::sleep;

use crate::{
    config::{PlayerConfig, UnmutePolicy},
    services::playback::{
        HostContainer, MediaCommand, MediaElement, MediaEvent, PlaybackController, PlayerState,
        SimulatedMedia,
    },
};

const TICK: Duration = Duration::from_millis(250);

fn mounted_with(config: PlayerConfig, duration: f64) -> (PlaybackController, Arc<SimulatedMedia>) {
    let media = Arc::new(SimulatedMedia::new(duration, TICK));
    let controller = PlaybackController::mount(
        config,
        Some(media.clone() as Arc<dyn MediaElement>),
        Some(media.clone() as Arc<dyn HostContainer>),
    );
    (controller, media)
}

fn mounted() -> (PlaybackController, Arc<SimulatedMedia>) {
    mounted_with(PlayerConfig::default(), 200.0)
}

async fn settle() {
    sleep(Duration::from_millis(1)).await;
    tokio::task::yield_now().await;
}

mod notifications {
    use super::*;

    #[test]
    fn metadata_is_idempotent_and_later_value_wins() {
        let (controller, _media) = mounted();

        controller.on_metadata_loaded(120.0);
        controller.on_metadata_loaded(120.0);
        assert_eq!(controller.state().duration_seconds, 120.0);

        controller.on_metadata_loaded(180.0);
        assert_eq!(controller.state().duration_seconds, 180.0);
    }

    #[test]
    fn tick_with_unknown_duration_yields_zero_ratio() {
        let (controller, _media) = mounted();

        controller.on_position_tick(10.0, 0.0);

        let state = controller.state();
        assert_eq!(state.position_ratio, 0.0);
        assert!(state.position_ratio.is_finite());
        assert_eq!(state.position_seconds, 10.0);
    }

    #[test]
    fn tick_computes_ratio_and_sanitises_input() {
        let (controller, _media) = mounted();

        controller.on_position_tick(30.0, 120.0);
        assert_eq!(controller.state().position_ratio, 25.0);

        controller.on_position_tick(f64::NAN, 120.0);
        assert_eq!(controller.state().position_ratio, 0.0);

        controller.on_position_tick(-4.0, f64::INFINITY);
        assert_eq!(controller.state().position_seconds, 0.0);
    }

    #[test]
    fn negative_metadata_duration_is_treated_as_unknown() {
        let (controller, _media) = mounted();

        controller.on_metadata_loaded(-1.0);

        assert_eq!(controller.state().duration_seconds, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn monitor_applies_media_notifications() {
        let (controller, media) = mounted();
        controller.monitor(media.events());

        media.load_metadata();
        settle().await;
        assert_eq!(controller.state().duration_seconds, 200.0);

        controller.toggle_play();
        sleep(Duration::from_millis(1000)).await;
        settle().await;

        let state = controller.state();
        assert_eq!(state.position_seconds, 1.0);
        assert_eq!(state.position_ratio, 0.5);
    }

    #[tokio::test(start_paused = true)]
    async fn end_of_stream_stops_playback_and_shows_controls() {
        let (controller, media) = mounted_with(PlayerConfig::default(), 1.0);
        controller.monitor(media.events());
        media.load_metadata();

        controller.toggle_play();
        sleep(Duration::from_millis(1100)).await;
        settle().await;

        let state = controller.state();
        assert!(!state.is_playing);
        assert!(state.controls_visible);
        assert_eq!(state.position_ratio, 100.0);
        assert!(!controller.hide_pending());
    }
}

mod seeking {
    use super::*;

    #[test]
    fn seek_updates_ratio_before_any_tick() {
        let (controller, media) = mounted();
        controller.on_metadata_loaded(200.0);

        controller.seek(50.0);

        let state = controller.state();
        assert_eq!(state.position_ratio, 50.0);
        assert_eq!(state.position_seconds, 100.0);
        assert_eq!(media.commands().last(), Some(&MediaCommand::SeekTo(100.0)));
    }

    #[test]
    fn stale_tick_does_not_snap_scrubber_back() {
        let (controller, _media) = mounted();
        controller.on_metadata_loaded(200.0);
        controller.on_position_tick(20.0, 200.0);

        controller.seek(50.0);
        controller.on_position_tick(20.25, 200.0);

        assert_eq!(controller.state().position_ratio, 50.0);
        assert!(controller.seek_pending());

        controller.on_position_tick(100.25, 200.0);

        assert!(!controller.seek_pending());
        assert_eq!(controller.state().position_seconds, 100.25);

        controller.on_position_tick(150.0, 200.0);
        assert_eq!(controller.state().position_ratio, 75.0);
    }

    #[test]
    fn seek_abandoned_after_stale_budget() {
        let config = PlayerConfig {
            seek_guard_max_stale_ticks: 2,
            ..PlayerConfig::default()
        };
        let (controller, _media) = mounted_with(config, 200.0);
        controller.on_metadata_loaded(200.0);

        controller.seek(50.0);
        controller.on_position_tick(20.0, 200.0);
        controller.on_position_tick(20.25, 200.0);
        assert_eq!(controller.state().position_ratio, 50.0);

        controller.on_position_tick(20.5, 200.0);
        assert_eq!(controller.state().position_seconds, 20.5);
    }

    #[test]
    fn out_of_range_ratios_are_clamped() {
        let (controller, media) = mounted();
        controller.on_metadata_loaded(200.0);

        controller.seek(150.0);
        assert_eq!(controller.state().position_ratio, 100.0);

        controller.seek(-5.0);
        assert_eq!(controller.state().position_ratio, 0.0);

        controller.seek(f64::NAN);
        assert_eq!(controller.state().position_ratio, 0.0);

        assert_eq!(
            media.commands(),
            vec![
                MediaCommand::SetVolume(crate::services::playback::Volume::FULL),
                MediaCommand::SeekTo(200.0),
                MediaCommand::SeekTo(0.0),
                MediaCommand::SeekTo(0.0),
            ]
        );
    }

    #[test]
    fn seek_before_metadata_is_ignored() {
        let (controller, media) = mounted();
        let before = media.commands().len();

        controller.seek(40.0);

        assert_eq!(controller.state().position_ratio, 0.0);
        assert_eq!(media.commands().len(), before);
    }
}

mod volume {
    use super::*;

    #[test]
    fn zero_volume_means_muted() {
        let (controller, media) = mounted();

        controller.set_volume(0.0);
        assert!(controller.state().is_muted);

        controller.set_volume(0.5);
        let state = controller.state();
        assert!(!state.is_muted);
        assert_eq!(*state.volume, 0.5);
        assert_eq!(*media.audible_volume(), 0.5);
    }

    #[test]
    fn volume_is_clamped() {
        let (controller, _media) = mounted();

        controller.set_volume(3.0);
        assert_eq!(*controller.state().volume, 1.0);

        controller.set_volume(-1.0);
        assert!(controller.state().is_muted);
    }

    #[test]
    fn fixed_unmute_policy_restores_full_volume() {
        let config = PlayerConfig {
            unmute_policy: UnmutePolicy::Fixed(1.0),
            ..PlayerConfig::default()
        };
        let (controller, _media) = mounted_with(config, 200.0);
        controller.set_volume(0.3);

        controller.toggle_mute();
        let muted = controller.state();
        assert!(muted.is_muted);
        assert_eq!(*muted.volume, 0.0);

        controller.toggle_mute();
        let unmuted = controller.state();
        assert!(!unmuted.is_muted);
        assert_eq!(*unmuted.volume, 1.0);
    }

    #[test]
    fn default_unmute_restores_previous_volume() {
        let (controller, media) = mounted();
        controller.set_volume(0.3);

        controller.toggle_mute();
        assert!(media.audible_volume().is_silent());

        controller.toggle_mute();
        assert_eq!(*controller.state().volume, 0.3);
        assert_eq!(*media.audible_volume(), 0.3);
    }

    #[test]
    fn unmuting_after_dragging_to_zero_restores_last_audible_volume() {
        let (controller, _media) = mounted();
        controller.set_volume(0.6);
        controller.set_volume(0.0);

        controller.toggle_mute();

        let state = controller.state();
        assert!(!state.is_muted);
        assert_eq!(*state.volume, 0.6);
    }

    #[test]
    fn initial_volume_comes_from_config() {
        let config = PlayerConfig {
            initial_volume: 0.0,
            ..PlayerConfig::default()
        };
        let (controller, _media) = mounted_with(config, 200.0);

        let state = controller.state();
        assert!(state.is_muted);
        assert_eq!(*state.last_audible_volume, 1.0);
    }
}

mod rate_and_fullscreen {
    use super::*;

    #[test]
    fn preset_rates_round_trip_exactly() {
        let (controller, _media) = mounted();

        for rate in [0.5, 1.0, 1.5, 2.0] {
            controller.set_playback_rate(rate);
            assert_eq!(*controller.state().playback_rate, rate);
        }
    }

    #[test]
    fn unlisted_rate_is_stored_without_highlight() {
        let (controller, _media) = mounted();

        controller.set_playback_rate(1.25);

        assert_eq!(*controller.state().playback_rate, 1.25);
        assert!(controller.surface().rate_menu.iter().all(|o| !o.selected));
    }

    #[test]
    fn toggle_fullscreen_only_requests() {
        let (controller, media) = mounted();

        controller.toggle_fullscreen();

        assert!(media.is_fullscreen());
        assert!(!controller.state().is_fullscreen);

        controller.on_fullscreen_change(true);
        assert!(controller.state().is_fullscreen);

        controller.toggle_fullscreen();
        assert_eq!(media.commands().last(), Some(&MediaCommand::ExitFullscreen));
    }

    #[tokio::test(start_paused = true)]
    async fn fullscreen_flag_follows_container_notifications() {
        let (controller, media) = mounted();
        controller.monitor(media.events());

        controller.toggle_fullscreen();
        settle().await;
        assert!(controller.state().is_fullscreen);

        controller.toggle_fullscreen();
        settle().await;
        assert!(!controller.state().is_fullscreen);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_fullscreen_does_not_desynchronise() {
        let (controller, media) = mounted();
        controller.monitor(media.events());
        media.set_fullscreen_allowed(false);

        controller.toggle_fullscreen();
        settle().await;

        assert!(!controller.state().is_fullscreen);
        assert!(!media.is_fullscreen());
    }
}

mod auto_hide {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn controls_hide_after_delay_and_activity_postpones() {
        let (controller, _media) = mounted();

        controller.toggle_play();
        assert!(controller.state().is_playing);

        sleep(Duration::from_millis(2999)).await;
        assert!(controller.state().controls_visible);

        controller.note_activity();
        sleep(Duration::from_millis(2998)).await;
        tokio::task::yield_now().await;
        assert!(controller.state().controls_visible);

        sleep(Duration::from_millis(3)).await;
        tokio::task::yield_now().await;
        assert!(!controller.state().controls_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn controls_never_hide_while_paused() {
        let (controller, _media) = mounted();

        controller.note_activity();
        sleep(Duration::from_secs(60)).await;

        assert!(controller.state().controls_visible);
        assert!(!controller.hide_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn pausing_cancels_pending_hide() {
        let (controller, _media) = mounted();

        controller.toggle_play();
        sleep(Duration::from_millis(1000)).await;
        controller.toggle_play();

        assert!(!controller.hide_pending());
        sleep(Duration::from_secs(10)).await;
        assert!(controller.state().controls_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn activity_reveals_hidden_controls() {
        let (controller, _media) = mounted();

        controller.toggle_play();
        sleep(Duration::from_millis(3100)).await;
        assert!(!controller.state().controls_visible);

        controller.note_activity();
        assert!(controller.state().controls_visible);
        assert!(controller.hide_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn pointer_leave_while_playing_does_not_force_hide() {
        let (controller, _media) = mounted();
        controller.toggle_play();

        sleep(Duration::from_millis(1000)).await;
        controller.pointer_left();
        assert!(controller.state().controls_visible);

        sleep(Duration::from_millis(2500)).await;
        assert!(controller.state().controls_visible);

        sleep(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;
        assert!(!controller.state().controls_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn pointer_leave_while_paused_shows_controls() {
        let (controller, _media) = mounted();
        controller.properties().controls_visible.set(false);

        controller.pointer_left();

        assert!(controller.state().controls_visible);
        assert!(!controller.hide_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn pointer_leave_while_playing_keeps_hidden_controls_hidden() {
        let (controller, _media) = mounted();
        controller.toggle_play();

        sleep(Duration::from_millis(3100)).await;
        assert!(!controller.state().controls_visible);

        controller.pointer_left();

        assert!(!controller.state().controls_visible);
        assert!(!controller.hide_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn pointer_leave_after_pausing_hidden_playback_shows_controls() {
        let (controller, _media) = mounted();
        controller.toggle_play();

        sleep(Duration::from_millis(3100)).await;
        assert!(!controller.state().controls_visible);

        controller.toggle_play();
        assert!(!controller.state().is_playing);
        assert!(controller.state().controls_visible);

        controller.pointer_left();
        sleep(Duration::from_secs(10)).await;

        assert!(controller.state().controls_visible);
        assert!(!controller.hide_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn reveal_after_hide_holds_for_full_delay() {
        let (controller, _media) = mounted();
        controller.toggle_play();

        sleep(Duration::from_millis(3100)).await;
        assert!(!controller.state().controls_visible);

        let mut visibility = Box::pin(controller.properties().controls_visible.watch());
        assert_eq!(visibility.next().await, Some(false));

        controller.note_activity();
        assert!(controller.hide_pending());

        sleep(Duration::from_millis(2999)).await;
        tokio::task::yield_now().await;
        assert!(controller.state().controls_visible);
        assert_eq!(visibility.next().await, Some(true));

        sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert!(!controller.state().controls_visible);
        assert_eq!(visibility.next().await, Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_toggles_leave_one_timer() {
        let (controller, _media) = mounted();

        controller.toggle_play();
        sleep(Duration::from_millis(2000)).await;
        controller.toggle_play();
        controller.toggle_play();

        sleep(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        assert!(controller.state().controls_visible);

        sleep(Duration::from_millis(1600)).await;
        tokio::task::yield_now().await;
        assert!(!controller.state().controls_visible);
    }
}

mod lifecycle {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn unmount_cancels_hide_timer() {
        let (controller, _media) = mounted();
        controller.toggle_play();
        assert!(controller.hide_pending());

        controller.unmount();

        assert!(!controller.hide_pending());
        sleep(Duration::from_secs(5)).await;
        assert!(controller.state().controls_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_controller_releases_timer() {
        let (controller, _media) = mounted();
        let properties = controller.properties().clone();
        controller.toggle_play();

        drop(controller);
        sleep(Duration::from_secs(5)).await;

        assert!(properties.controls_visible.get());
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_stops_monitoring() {
        let (controller, media) = mounted();
        controller.monitor(media.events());
        controller.unmount();
        settle().await;

        media.emit(MediaEvent::MetadataLoaded { duration: 42.0 });
        settle().await;

        assert_eq!(controller.state().duration_seconds, 0.0);
    }

    #[test]
    fn missing_media_element_makes_operations_no_ops() {
        let controller = PlaybackController::mount(PlayerConfig::default(), None, None);

        controller.toggle_play();
        controller.on_metadata_loaded(100.0);
        controller.seek(50.0);
        controller.set_volume(0.2);
        controller.toggle_mute();
        controller.set_playback_rate(2.0);
        controller.toggle_fullscreen();

        let expected = PlayerState {
            duration_seconds: 100.0,
            ..PlayerState::default()
        };
        assert_eq!(controller.state(), expected);
    }

    #[test]
    fn rejected_commands_leave_state_untouched() {
        let (controller, media) = mounted();
        media.set_rejecting(true);

        controller.toggle_play();
        controller.set_volume(0.2);
        controller.set_playback_rate(2.0);

        let state = controller.state();
        assert!(!state.is_playing);
        assert!(state.controls_visible);
        assert_eq!(*state.volume, 1.0);
        assert_eq!(*state.playback_rate, 1.0);
    }

    #[test]
    fn works_without_async_runtime() {
        let (controller, _media) = mounted();

        controller.toggle_play();
        controller.note_activity();

        assert!(controller.state().is_playing);
        assert!(controller.state().controls_visible);
        assert!(!controller.hide_pending());
    }

    #[tokio::test]
    async fn watch_emits_snapshot_on_change() {
        let (controller, _media) = mounted();
        let mut updates = Box::pin(controller.properties().watch());

        controller.set_volume(0.4);

        let mut saw_volume = false;
        while let Some(state) = futures::FutureExt::now_or_never(updates.next()).flatten() {
            if *state.volume == 0.4 {
                saw_volume = true;
            }
        }
        assert!(saw_volume);
    }
}
