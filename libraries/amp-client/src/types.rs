//! Wire types for the store API.

use amp_core::{Folder, Track, TrackMetadata};
use serde::Deserialize;
use std::collections::HashMap;

/// A file entry as the store reports it, before MIME filtering
#[derive(Debug, Clone, Deserialize)]
pub struct RawFile {
    /// Opaque store id
    pub id: String,

    /// File name including extension
    pub name: String,

    /// MIME type reported by the store
    #[serde(rename = "mimeType")]
    pub mime_type: String,

    /// File size in bytes, when the store reports one
    #[serde(default)]
    pub size: Option<u64>,
}

impl RawFile {
    /// Convert into a playable track
    pub fn into_track(self) -> Track {
        let mut track = Track::new(self.id, self.name, self.mime_type);
        track.size_bytes = self.size;
        track
    }
}

/// A folder entry as the store reports it
#[derive(Debug, Clone, Deserialize)]
pub struct RawFolder {
    /// Opaque store id
    pub id: String,

    /// Folder display name
    pub name: String,
}

impl RawFolder {
    /// Convert into a catalog folder
    pub fn into_folder(self) -> Folder {
        Folder {
            id: self.id,
            name: self.name,
        }
    }
}

/// Raw listing response from the store
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub files: Vec<RawFile>,

    #[serde(default)]
    pub folders: Vec<RawFolder>,
}

/// One folder's browsable contents: playable audio files plus
/// subfolders, non-audio entries already filtered out.
#[derive(Debug, Clone, Default)]
pub struct FileListing {
    /// Audio tracks in this folder
    pub files: Vec<Track>,

    /// Subfolders
    pub folders: Vec<Folder>,
}

/// Metadata extraction results for one batch of track ids.
///
/// An id present in `results` has metadata; an id in `failed` should
/// be retried later; an id in neither was checked and has none worth
/// storing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataResponse {
    /// Extracted metadata keyed by track id
    #[serde(default)]
    pub results: HashMap<String, TrackMetadata>,

    /// Ids the store failed to process (transient; retry later)
    #[serde(default)]
    pub failed: Vec<String>,
}

/// Likes list response from the store
#[derive(Debug, Deserialize)]
pub(crate) struct LikesResponse {
    #[serde(default)]
    pub ids: Vec<String>,
}
