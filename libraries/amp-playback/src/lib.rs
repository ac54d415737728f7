//! Amp - Playback Engine
//!
//! Platform-agnostic playback management for Amp.
//!
//! This crate provides:
//! - Two-tier queue system (user queue + library queue)
//! - Shuffle (uniform, current track pinned first)
//! - Repeat modes (Off, All, One) with fixed track-ended precedence
//! - Volume control with independent mute
//! - Seek with post-seek debounce of transient position reports
//! - Next-track preloading keyed by projected track id
//! - Session persistence (volume + last playback context)
//!
//! # Architecture
//!
//! `amp-playback` is completely platform-agnostic: it performs no
//! audio or network I/O itself. The embedding platform implements the
//! [`Transport`] trait around its playback primitive and feeds the
//! primitive's notifications back as [`TransportEvent`]s; the
//! [`Player`] is the single authority computing every state
//! transition in between.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use amp_core::Track;
//! use amp_playback::{Player, PlayerConfig, Result, Transport, TransportEvent};
//!
//! // Implement Transport for your platform's playback primitive
//! struct NullTransport;
//!
//! impl Transport for NullTransport {
//!     fn load(&mut self, _track: &Track) -> Result<()> { Ok(()) }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn seek(&mut self, _seconds: f64) -> Result<()> { Ok(()) }
//!     fn set_volume(&mut self, _volume: f32) -> Result<()> { Ok(()) }
//!     fn set_muted(&mut self, _muted: bool) -> Result<()> { Ok(()) }
//!     fn warm(&mut self, _track: &Track) -> Result<()> { Ok(()) }
//! }
//!
//! let mut player = Player::new(NullTransport, PlayerConfig::default());
//!
//! let library = vec![
//!     Track::new("1", "one.flac", "audio/flac"),
//!     Track::new("2", "two.flac", "audio/flac"),
//! ];
//! player.play_track(library[0].clone(), library, 0);
//!
//! // Playback state follows the primitive's events, not the request
//! assert!(!player.is_playing());
//! player.on_transport_event(TransportEvent::Playing);
//! assert!(player.is_playing());
//! ```
//!
//! # Example: Queue and Modes
//!
//! ```rust
//! use amp_playback::{Player, PlayerConfig, RepeatMode};
//! # use amp_core::Track;
//! # use amp_playback::{Result, Transport};
//! # struct NullTransport;
//! # impl Transport for NullTransport {
//! #     fn load(&mut self, _track: &Track) -> Result<()> { Ok(()) }
//! #     fn play(&mut self) -> Result<()> { Ok(()) }
//! #     fn pause(&mut self) -> Result<()> { Ok(()) }
//! #     fn seek(&mut self, _seconds: f64) -> Result<()> { Ok(()) }
//! #     fn set_volume(&mut self, _volume: f32) -> Result<()> { Ok(()) }
//! #     fn set_muted(&mut self, _muted: bool) -> Result<()> { Ok(()) }
//! #     fn warm(&mut self, _track: &Track) -> Result<()> { Ok(()) }
//! # }
//!
//! let mut player = Player::new(NullTransport, PlayerConfig::default());
//!
//! player.add_to_queue(Track::new("q1", "queued.flac", "audio/flac"));
//! player.set_repeat(RepeatMode::All);
//! player.toggle_shuffle();
//! ```

#![forbid(unsafe_code)]

mod command;
mod error;
mod events;
mod persist;
mod player;
mod preload;
mod queue;
mod shuffle;
mod transport;
pub mod types;
mod volume;

// Public exports
pub use command::{Command, SEEK_STEP_SECS, VOLUME_STEP};
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use persist::{PersistHandle, QueueSnapshot};
pub use player::Player;
pub use preload::Preloader;
pub use queue::Queue;
pub use shuffle::{shuffle_keeping_current, shuffle_tracks};
pub use transport::{Transport, TransportEvent, SEEK_DEBOUNCE};
pub use types::{PlayerConfig, RepeatMode};
pub use volume::Volume;
