//! Player commands
//!
//! A serializable command vocabulary for driving the player from
//! keyboard shortcuts, media keys, or a remote-control surface.
//! Each command maps onto one player method with fixed step sizes.

use crate::player::Player;
use crate::transport::Transport;
use serde::{Deserialize, Serialize};

/// Seek step for forward/back commands (seconds)
pub const SEEK_STEP_SECS: f64 = 10.0;

/// Volume step for up/down commands
pub const VOLUME_STEP: f32 = 0.05;

/// A single remote-control action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Toggle between play and pause
    TogglePlay,

    /// Skip to the next track
    Next,

    /// Previous track (or restart past the scrub-back threshold)
    Previous,

    /// Seek forward by [`SEEK_STEP_SECS`]
    SeekForward,

    /// Seek back by [`SEEK_STEP_SECS`]
    SeekBack,

    /// Raise volume by [`VOLUME_STEP`]
    VolumeUp,

    /// Lower volume by [`VOLUME_STEP`]
    VolumeDown,

    /// Toggle mute
    ToggleMute,

    /// Toggle shuffle
    ToggleShuffle,

    /// Cycle repeat off -> all -> one
    CycleRepeat,
}

impl<T: Transport> Player<T> {
    /// Apply a remote-control command
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::TogglePlay => self.toggle_play(),
            Command::Next => self.next_track(),
            Command::Previous => self.prev_track(),
            Command::SeekForward => self.seek(self.position() + SEEK_STEP_SECS),
            Command::SeekBack => self.seek((self.position() - SEEK_STEP_SECS).max(0.0)),
            Command::VolumeUp => self.set_volume(self.volume() + VOLUME_STEP),
            Command::VolumeDown => self.set_volume(self.volume() - VOLUME_STEP),
            Command::ToggleMute => self.toggle_mute(),
            Command::ToggleShuffle => self.toggle_shuffle(),
            Command::CycleRepeat => self.cycle_repeat(),
        }
    }
}
