//! Amp - Remote File Store Client
//!
//! Async HTTP client for the Amp file store, plus the client-side
//! state it feeds:
//!
//! - [`StoreClient`] — listing, metadata, stream/art URLs, likes
//! - [`Catalog`] — folder-listing cache for instant back-navigation
//! - [`EnrichmentPipeline`] — batched, concurrent metadata enrichment
//! - [`LikesStore`] — liked-set mirror with optimistic updates
//!
//! # Example
//!
//! ```ignore
//! use amp_client::{Catalog, EnrichmentPipeline, StoreClient};
//!
//! let client = StoreClient::new("https://store.example.com")?;
//! client.set_token(token).await;
//!
//! // Browse (cached per folder)
//! let mut catalog = Catalog::new();
//! let listing = catalog.browse(&client, None).await?;
//!
//! // Enrich whatever is visible
//! let mut enrichment = EnrichmentPipeline::new();
//! let tracks = listing.files.clone();
//! enrichment.run_pass(&tracks, &client, |results| {
//!     catalog.apply_metadata(results);
//! }).await;
//! ```

#![forbid(unsafe_code)]

mod catalog;
mod client;
mod enrichment;
mod error;
mod likes;
pub mod types;

// Public exports
pub use catalog::Catalog;
pub use client::{StoreClient, METADATA_BATCH_LIMIT};
pub use enrichment::{EnrichmentPipeline, MetadataProvider, ENRICH_BATCH_SIZE};
pub use error::{ClientError, Result};
pub use likes::{LikesBackend, LikesStore};
pub use types::{FileListing, MetadataResponse, RawFile, RawFolder};
