//! Reelview demo - drives a playback controller through a scripted session
//! against a simulated media element and prints the control overlay after
//! every step.

use std::{error::Error, path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use reelview::{
    config::Config,
    services::playback::{HostContainer, MediaElement, PlaybackController, SimulatedMedia},
    tracing_config,
};
use tracing::{Level, info, span};

/// Scripted playback session against a simulated video
#[derive(Debug, Parser)]
#[command(name = "reelview", version)]
struct Args {
    /// Config file to load instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Length of the simulated video in seconds
    #[arg(long, default_value_t = 212.0)]
    duration: f64,

    /// Print compact single-line JSON
    #[arg(long)]
    compact: bool,

    /// Also write logs to the Reelview log directory
    #[arg(long)]
    log_file: bool,

    /// Print the JSON schema of the config file and exit
    #[arg(long)]
    print_schema: bool,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Play,
    Wait(u64),
    Seek(f64),
    Volume(f64),
    ToggleMute,
    Rate(f64),
    Fullscreen,
    PointerMove,
    PointerLeave,
    Pause,
}

const SCRIPT: &[Step] = &[
    Step::Play,
    Step::Wait(1500),
    Step::Rate(1.5),
    Step::Wait(3500),
    Step::PointerMove,
    Step::Seek(50.0),
    Step::Wait(1000),
    Step::Volume(0.4),
    Step::ToggleMute,
    Step::ToggleMute,
    Step::Fullscreen,
    Step::Wait(500),
    Step::PointerLeave,
    Step::Pause,
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if args.print_schema {
        let schema = schemars::schema_for!(Config);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let config = match args.config.as_deref() {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    let _log_guard = if args.log_file {
        Some(tracing_config::init_with_file(config.general.log_level)?)
    } else {
        tracing_config::init(config.general.log_level)?;
        None
    };
    let _span = span!(Level::INFO, "reelview_demo").entered();
    info!(duration = args.duration, "Starting scripted playback session");

    let media = Arc::new(SimulatedMedia::new(
        args.duration,
        config.player.tick_interval(),
    ));
    let controller = PlaybackController::mount(
        config.player,
        Some(media.clone() as Arc<dyn MediaElement>),
        Some(media.clone() as Arc<dyn HostContainer>),
    );
    controller.monitor(media.events());
    media.load_metadata();

    for step in SCRIPT {
        match *step {
            Step::Play | Step::Pause => controller.toggle_play(),
            Step::Wait(millis) => tokio::time::sleep(Duration::from_millis(millis)).await,
            Step::Seek(ratio) => controller.seek(ratio),
            Step::Volume(volume) => controller.set_volume(volume),
            Step::ToggleMute => controller.toggle_mute(),
            Step::Rate(rate) => controller.set_playback_rate(rate),
            Step::Fullscreen => controller.toggle_fullscreen(),
            Step::PointerMove => controller.note_activity(),
            Step::PointerLeave => controller.pointer_left(),
        }
        tokio::task::yield_now().await;

        let surface = controller.surface();
        let rendered = if args.compact {
            serde_json::to_string(&surface)?
        } else {
            serde_json::to_string_pretty(&surface)?
        };
        println!("{step:?}\n{rendered}");
    }

    controller.unmount();
    info!("Session finished");
    Ok(())
}
