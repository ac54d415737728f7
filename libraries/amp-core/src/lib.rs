//! amp Core
//!
//! Shared domain types for the amp player.
//!
//! This crate defines the track and folder records exchanged between
//! the remote-store client and the playback engine. Tracks are
//! identified by an opaque remote file id; all other fields may be
//! enriched after listing (see [`Track::apply`]).
//!
//! # Example
//!
//! ```rust
//! use amp_core::{Track, TrackMetadata};
//!
//! let mut track = Track::new("f1", "01 - intro.flac", "audio/flac");
//! assert_eq!(track.display_title(), "01 - intro.flac");
//!
//! let meta = TrackMetadata {
//!     title: Some("Intro".to_string()),
//!     artist: Some("Someone".to_string()),
//!     album: None,
//! };
//! assert!(track.apply(&meta));
//! assert_eq!(track.display_title(), "Intro");
//! ```

#![forbid(unsafe_code)]

pub mod audio;
pub mod track;

pub use audio::{is_audio_mime, AUDIO_MIME_TYPES};
pub use track::{Folder, Track, TrackMetadata};
