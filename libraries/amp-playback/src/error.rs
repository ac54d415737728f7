//! Error types for the playback engine

use thiserror::Error;

/// Playback errors
///
/// Only transport implementations produce these; the player itself
/// degrades to no-ops on invalid input and never fails the caller.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The underlying playback primitive rejected a command
    #[error("Transport error: {0}")]
    Transport(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
