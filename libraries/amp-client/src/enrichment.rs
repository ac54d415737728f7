//! Metadata enrichment pipeline.
//!
//! The store lists files with names and MIME types only; titles,
//! artists, and albums arrive later from server-side tag extraction.
//! This pipeline finds tracks still lacking metadata, batches their
//! ids, dispatches all batches concurrently, and applies each batch's
//! results as it completes so early batches improve the UI while
//! later ones are still in flight.
//!
//! Request bookkeeping guarantees each id is asked about at most once
//! per outcome: ids in a batch that fails (transport error or listed
//! in the response's `failed`) are evicted and re-planned on the next
//! pass, while ids that succeed with no metadata are never asked
//! about again.

use crate::client::StoreClient;
use crate::error::Result;
use crate::types::MetadataResponse;
use amp_core::{Track, TrackMetadata};
use async_trait::async_trait;
use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Number of track ids per enrichment batch
pub const ENRICH_BATCH_SIZE: usize = 20;

/// Source of extracted metadata for batches of track ids
#[async_trait]
pub trait MetadataProvider: Sync {
    /// Fetch metadata for a batch of track ids
    async fn fetch_metadata(&self, ids: &[String]) -> Result<MetadataResponse>;
}

#[async_trait]
impl MetadataProvider for StoreClient {
    async fn fetch_metadata(&self, ids: &[String]) -> Result<MetadataResponse> {
        StoreClient::fetch_metadata(self, ids).await
    }
}

/// Stateful enrichment driver.
///
/// Holds the requested-id set across passes; create one per session
/// (or per store) and feed it every visible track list.
#[derive(Debug, Default)]
pub struct EnrichmentPipeline {
    requested: HashSet<String>,
}

impl EnrichmentPipeline {
    /// Create a pipeline with no requests outstanding
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan the batches for one pass: ids of tracks lacking both
    /// title and artist that have not been requested yet, in input
    /// order, chunked by [`ENRICH_BATCH_SIZE`]. Planned ids are
    /// marked requested immediately.
    pub fn plan_batches(&mut self, tracks: &[Track]) -> Vec<Vec<String>> {
        let mut pending = Vec::new();
        for track in tracks {
            if track.needs_metadata() && self.requested.insert(track.id.clone()) {
                pending.push(track.id.clone());
            }
        }
        pending
            .chunks(ENRICH_BATCH_SIZE)
            .map(<[String]>::to_vec)
            .collect()
    }

    /// Run one enrichment pass over `tracks`.
    ///
    /// All batches are dispatched concurrently; `apply` is called
    /// with each batch's results as that batch completes. Returns the
    /// number of ids that received metadata.
    pub async fn run_pass<P, F>(&mut self, tracks: &[Track], provider: &P, mut apply: F) -> usize
    where
        P: MetadataProvider,
        F: FnMut(&HashMap<String, TrackMetadata>),
    {
        let batches = self.plan_batches(tracks);
        if batches.is_empty() {
            return 0;
        }
        debug!(batches = batches.len(), "dispatching enrichment pass");

        let mut in_flight: FuturesUnordered<_> = batches
            .iter()
            .map(|ids| async move { (ids, provider.fetch_metadata(ids).await) })
            .collect();

        let mut enriched = 0;
        while let Some((ids, result)) = in_flight.next().await {
            match result {
                Ok(response) => {
                    if !response.results.is_empty() {
                        enriched += response.results.len();
                        apply(&response.results);
                    }
                    // Transient failures retry on the next pass
                    for id in &response.failed {
                        self.requested.remove(id);
                    }
                }
                Err(e) => {
                    warn!(ids = ids.len(), error = %e, "enrichment batch failed");
                    for id in ids {
                        self.requested.remove(id);
                    }
                }
            }
        }

        debug!(enriched, "enrichment pass complete");
        enriched
    }

    /// Whether an id has been requested and not evicted
    pub fn is_requested(&self, id: &str) -> bool {
        self.requested.contains(id)
    }

    /// Forget all request bookkeeping (new session or store)
    pub fn reset(&mut self) {
        self.requested.clear();
    }
}
