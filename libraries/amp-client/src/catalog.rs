//! Folder catalog with listing cache.
//!
//! Browsing the store walks a folder tree; listings are cached per
//! folder id so navigating back renders instantly instead of
//! re-fetching. Metadata learned through enrichment is written back
//! into the cached listings, so re-entering a folder keeps its
//! enriched titles.

use crate::client::StoreClient;
use crate::error::Result;
use crate::types::FileListing;
use amp_core::{Track, TrackMetadata};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Cache key for the store root (folders have real ids)
const ROOT_KEY: &str = "__root__";

/// Cached view of the store's folder tree
#[derive(Debug, Default)]
pub struct Catalog {
    cache: HashMap<String, FileListing>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    fn key(folder_id: Option<&str>) -> String {
        folder_id.unwrap_or(ROOT_KEY).to_string()
    }

    /// Browse a folder, serving from cache when possible
    pub async fn browse(
        &mut self,
        client: &StoreClient,
        folder_id: Option<&str>,
    ) -> Result<&FileListing> {
        match self.cache.entry(Self::key(folder_id)) {
            Entry::Occupied(entry) => {
                debug!(folder = folder_id.unwrap_or("<root>"), "catalog cache hit");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                let listing = client.list_files(folder_id).await?;
                Ok(entry.insert(listing))
            }
        }
    }

    /// Cached listing for a folder, if present
    pub fn cached(&self, folder_id: Option<&str>) -> Option<&FileListing> {
        self.cache.get(&Self::key(folder_id))
    }

    /// Drop one folder's cached listing so the next browse re-fetches
    pub fn invalidate(&mut self, folder_id: Option<&str>) {
        self.cache.remove(&Self::key(folder_id));
    }

    /// Drop all cached listings
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Merge metadata patches into every cached track sharing an id.
    /// Returns how many cached entries changed.
    pub fn apply_metadata(&mut self, patches: &HashMap<String, TrackMetadata>) -> usize {
        let mut changed = 0;
        for listing in self.cache.values_mut() {
            for track in &mut listing.files {
                if let Some(meta) = patches.get(&track.id) {
                    if track.apply(meta) {
                        changed += 1;
                    }
                }
            }
        }
        changed
    }

    /// Every cached track, deduplicated by id
    pub fn all_cached_tracks(&self) -> Vec<Track> {
        let mut seen = HashSet::new();
        let mut tracks = Vec::new();
        for listing in self.cache.values() {
            for track in &listing.files {
                if seen.insert(track.id.clone()) {
                    tracks.push(track.clone());
                }
            }
        }
        tracks
    }

    /// Cached tracks whose ids are in `liked`, for building the
    /// liked-list play context
    pub fn liked_tracks(&self, liked: &HashSet<String>) -> Vec<Track> {
        self.all_cached_tracks()
            .into_iter()
            .filter(|t| liked.contains(&t.id))
            .collect()
    }
}
