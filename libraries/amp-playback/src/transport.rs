//! Media transport abstraction
//!
//! The player issues commands to one underlying audio playback
//! primitive through this trait and reacts only to the events the
//! primitive emits. Commands are asynchronous requests: the actual
//! playback state is observed via [`TransportEvent`], never via a
//! call's return value. Loading a new source implicitly abandons any
//! in-flight playback of the previous one.

use crate::error::Result;
use amp_core::Track;
use std::time::Duration;

/// Debounce window after a programmatic seek during which transient
/// time updates are suppressed. The underlying primitive reports
/// intermediate positions while its internal seeking state settles;
/// surfacing those would snap the position indicator back.
pub const SEEK_DEBOUNCE: Duration = Duration::from_millis(300);

/// Commands the player sends to the playback primitive
pub trait Transport {
    /// Assign a new source. Abandons the previous source implicitly.
    fn load(&mut self, track: &Track) -> Result<()>;

    /// Request playback to start or resume
    fn play(&mut self) -> Result<()>;

    /// Request playback to pause
    fn pause(&mut self) -> Result<()>;

    /// Set the playback position in seconds
    fn seek(&mut self, seconds: f64) -> Result<()>;

    /// Set the output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32) -> Result<()>;

    /// Set the mute state, independent of volume
    fn set_muted(&mut self, muted: bool) -> Result<()>;

    /// Warm an upcoming resource in a silent, parallel primitive so a
    /// later `load` of the same track starts with bytes already
    /// buffered. Never audible, best-effort.
    fn warm(&mut self, track: &Track) -> Result<()>;
}

/// Events the playback primitive emits
///
/// These are the only transport-originated triggers the player
/// reacts to, processed in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// Playback position changed (seconds)
    TimeUpdate(f64),

    /// Track duration became known or changed (seconds)
    DurationChange(f64),

    /// Playback actually started
    Playing,

    /// Playback actually paused
    Paused,

    /// The current track finished
    Ended,
}
