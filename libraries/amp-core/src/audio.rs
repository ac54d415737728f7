//! Audio MIME classification
//!
//! The remote store lists every file in a folder; only these MIME
//! types are treated as playable tracks.

/// MIME types the player accepts as audio
pub const AUDIO_MIME_TYPES: &[&str] = &[
    "audio/flac",
    "audio/mpeg",
    "audio/ogg",
    "audio/wav",
    "audio/x-flac",
    "audio/mp4",
    "audio/aac",
    "audio/x-m4a",
];

/// Check whether a MIME type is playable audio
pub fn is_audio_mime(mime: &str) -> bool {
    AUDIO_MIME_TYPES.contains(&mime)
}
