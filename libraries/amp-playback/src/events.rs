//! Player events
//!
//! Event-based communication for UI synchronization. The player
//! pushes events into an internal buffer on every accepted state
//! transition; the embedding application drains them with
//! [`crate::Player::take_events`] after each call.

use serde::{Deserialize, Serialize};

/// Events emitted by the player state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Playing/paused flipped
    StateChanged {
        /// Whether audio is now playing
        is_playing: bool,
    },

    /// A different track became current
    TrackChanged {
        /// ID of the new current track
        track_id: String,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// The user queue changed (add/remove/consume/clear)
    QueueChanged {
        /// New user queue length
        user_queue_len: usize,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// Volume level (0.0-1.0)
        volume: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Shuffle was toggled
    ShuffleChanged {
        /// New shuffle state
        shuffle: bool,
    },

    /// Repeat mode changed
    RepeatChanged {
        /// New repeat mode
        repeat: crate::types::RepeatMode,
    },

    /// Metadata was merged into one or more tracks
    MetadataUpdated {
        /// IDs whose records actually changed
        track_ids: Vec<String>,
    },

    /// Position update (per transport time update)
    PositionUpdate {
        /// Current position in seconds
        position: f64,
        /// Track duration in seconds (0.0 when unknown)
        duration: f64,
    },
}
