//! Liked-tracks store with optimistic updates.
//!
//! Keeps a local mirror of the server-side liked set so the UI can
//! flip a heart instantly. A toggle mutates the mirror first, then
//! confirms with the server; on failure the mirror rolls back to its
//! pre-toggle state and the error propagates.

use crate::client::StoreClient;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Server-side likes operations
#[async_trait]
pub trait LikesBackend: Sync {
    /// Fetch the ids of all liked tracks
    async fn fetch_likes(&self) -> Result<Vec<String>>;

    /// Mark a track as liked
    async fn add_like(&self, id: &str) -> Result<()>;

    /// Remove a track from the liked set
    async fn remove_like(&self, id: &str) -> Result<()>;
}

#[async_trait]
impl LikesBackend for StoreClient {
    async fn fetch_likes(&self) -> Result<Vec<String>> {
        StoreClient::fetch_likes(self).await
    }

    async fn add_like(&self, id: &str) -> Result<()> {
        StoreClient::add_like(self, id).await
    }

    async fn remove_like(&self, id: &str) -> Result<()> {
        StoreClient::remove_like(self, id).await
    }
}

/// Local mirror of the liked-track set
#[derive(Debug, Default)]
pub struct LikesStore {
    liked: HashSet<String>,
}

impl LikesStore {
    /// Create an empty store; call [`refresh`](Self::refresh) to
    /// populate it
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a track is currently liked (per the local mirror)
    pub fn is_liked(&self, id: &str) -> bool {
        self.liked.contains(id)
    }

    /// The liked ids
    pub fn ids(&self) -> &HashSet<String> {
        &self.liked
    }

    /// Replace the mirror with the server's current liked set
    pub async fn refresh<B: LikesBackend>(&mut self, backend: &B) -> Result<()> {
        let ids = backend.fetch_likes().await?;
        debug!(count = ids.len(), "refreshed likes");
        self.liked = ids.into_iter().collect();
        Ok(())
    }

    /// Toggle a track's liked state optimistically.
    ///
    /// Returns the new liked state on success. On server failure the
    /// local state is rolled back and the error returned.
    pub async fn toggle<B: LikesBackend>(&mut self, backend: &B, id: &str) -> Result<bool> {
        let now_liked = !self.liked.contains(id);

        // Optimistic flip before the round-trip
        if now_liked {
            self.liked.insert(id.to_string());
        } else {
            self.liked.remove(id);
        }

        let result = if now_liked {
            backend.add_like(id).await
        } else {
            backend.remove_like(id).await
        };

        if let Err(e) = result {
            warn!(track_id = id, error = %e, "like toggle failed, rolling back");
            if now_liked {
                self.liked.remove(id);
            } else {
                self.liked.insert(id.to_string());
            }
            return Err(e);
        }

        Ok(now_liked)
    }
}
