//! Track and folder domain types

use serde::{Deserialize, Serialize};

/// A playable audio file in the remote store.
///
/// Identity is the opaque remote file `id`; everything else is
/// display data. Title/artist/album arrive later through metadata
/// enrichment and are merged in place, never replacing identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Opaque remote file identifier (unique)
    pub id: String,

    /// File name as listed by the store
    pub name: String,

    /// MIME type reported by the store
    pub mime_type: String,

    /// File size in bytes, when the store reports one
    pub size_bytes: Option<u64>,

    /// Embedded tag title (enriched)
    pub title: Option<String>,

    /// Embedded tag artist (enriched)
    pub artist: Option<String>,

    /// Embedded tag album (enriched)
    pub album: Option<String>,

    /// Track duration in seconds, when known
    pub duration_seconds: Option<f64>,
}

impl Track {
    /// Create a track with listing data only (no enrichment yet)
    pub fn new(id: impl Into<String>, name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: None,
            title: None,
            artist: None,
            album: None,
            duration_seconds: None,
        }
    }

    /// Best available display title: tag title, else file name
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Whether the track still needs enrichment (no title and no artist)
    pub fn needs_metadata(&self) -> bool {
        self.title.is_none() && self.artist.is_none()
    }

    /// Merge a metadata patch into this track.
    ///
    /// Only present fields overwrite; absent fields leave existing
    /// values untouched. Returns `true` if any field changed, so
    /// callers can skip downstream work for no-op merges. Applying
    /// the same patch twice changes nothing the second time.
    pub fn apply(&mut self, meta: &TrackMetadata) -> bool {
        let mut changed = false;

        if let Some(title) = &meta.title {
            if self.title.as_ref() != Some(title) {
                self.title = Some(title.clone());
                changed = true;
            }
        }
        if let Some(artist) = &meta.artist {
            if self.artist.as_ref() != Some(artist) {
                self.artist = Some(artist.clone());
                changed = true;
            }
        }
        if let Some(album) = &meta.album {
            if self.album.as_ref() != Some(album) {
                self.album = Some(album.clone());
                changed = true;
            }
        }

        changed
    }
}

/// Metadata patch for a single track, as returned by the metadata
/// service. Absent fields mean "leave alone", not "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMetadata {
    /// Tag title
    pub title: Option<String>,

    /// Tag artist
    pub artist: Option<String>,

    /// Tag album
    pub album: Option<String>,
}

impl TrackMetadata {
    /// True when the patch carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none() && self.album.is_none()
    }
}

/// A browsable folder in the remote store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Opaque remote folder identifier
    pub id: String,

    /// Folder display name
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch(title: Option<&str>, artist: Option<&str>, album: Option<&str>) -> TrackMetadata {
        TrackMetadata {
            title: title.map(String::from),
            artist: artist.map(String::from),
            album: album.map(String::from),
        }
    }

    #[test]
    fn display_title_falls_back_to_name() {
        let mut track = Track::new("f1", "01 - intro.flac", "audio/flac");
        assert_eq!(track.display_title(), "01 - intro.flac");

        track.title = Some("Intro".to_string());
        assert_eq!(track.display_title(), "Intro");
    }

    #[test]
    fn apply_merges_present_fields_only() {
        let mut track = Track::new("f1", "song.flac", "audio/flac");
        track.artist = Some("Existing Artist".to_string());

        let changed = track.apply(&patch(Some("Title"), None, Some("Album")));
        assert!(changed);
        assert_eq!(track.title.as_deref(), Some("Title"));
        assert_eq!(track.artist.as_deref(), Some("Existing Artist"));
        assert_eq!(track.album.as_deref(), Some("Album"));
    }

    #[test]
    fn apply_is_idempotent() {
        let mut track = Track::new("f1", "song.flac", "audio/flac");
        let meta = patch(Some("Title"), Some("Artist"), None);

        assert!(track.apply(&meta));
        // Second application is a no-op
        assert!(!track.apply(&meta));
    }

    #[test]
    fn apply_empty_patch_changes_nothing() {
        let mut track = Track::new("f1", "song.flac", "audio/flac");
        let before = track.clone();

        assert!(!track.apply(&TrackMetadata::default()));
        assert_eq!(track, before);
    }

    #[test]
    fn track_survives_persistence_round_trip() {
        let mut track = Track::new("f1", "song.flac", "audio/flac");
        track.size_bytes = Some(4096);
        track.title = Some("Title".to_string());
        track.duration_seconds = Some(183.5);

        let json = serde_json::to_string(&track).unwrap();
        let restored: Track = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, track);
    }

    #[test]
    fn needs_metadata_until_title_or_artist_set() {
        let mut track = Track::new("f1", "song.flac", "audio/flac");
        assert!(track.needs_metadata());

        track.apply(&patch(None, Some("Artist"), None));
        assert!(!track.needs_metadata());
    }
}
