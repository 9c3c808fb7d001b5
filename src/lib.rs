//! Reelview - video playback control surface.
//!
//! Reelview models the custom transport controls of a single video player:
//! play/pause, scrubbing, volume and mute, playback rate, fullscreen, and an
//! overlay that hides itself during playback. The main features include:
//!
//! - A [`PlaybackController`](services::playback::PlaybackController) that
//!   turns user intents and media notifications into state transitions
//! - Reactive properties for fine-grained rendering
//! - A serialisable render model of the control overlay
//! - TOML configuration and structured logging
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use reelview::config::PlayerConfig;
//! use reelview::services::playback::{
//!     HostContainer, MediaElement, PlaybackController, SimulatedMedia,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let config = PlayerConfig::default();
//! let media = Arc::new(SimulatedMedia::new(120.0, config.tick_interval()));
//! let controller = PlaybackController::mount(
//!     config,
//!     Some(media.clone() as Arc<dyn MediaElement>),
//!     Some(media.clone() as Arc<dyn HostContainer>),
//! );
//! controller.monitor(media.events());
//!
//! controller.toggle_play();
//! println!("{:?}", controller.surface());
//! # }
//! ```

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Playback services and shared reactive building blocks.
pub mod services;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{ReelviewError, Result};
