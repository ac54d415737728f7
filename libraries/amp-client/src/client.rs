//! Main store client.

use crate::error::{ClientError, Result};
use crate::types::{FileListing, LikesResponse, ListResponse, MetadataResponse};
use amp_core::is_audio_mime;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

/// Maximum number of track ids per metadata request. Larger inputs
/// are split into sequential requests and the responses merged.
pub const METADATA_BATCH_LIMIT: usize = 50;

/// Client for the remote file store API.
///
/// Handles URL normalization, bearer authentication, and the listing,
/// metadata, streaming, and likes endpoints. Cheap to share behind an
/// `Arc`; the token is interior-mutable.
///
/// # Example
///
/// ```ignore
/// use amp_client::StoreClient;
///
/// let client = StoreClient::new("https://store.example.com")?;
/// client.set_token("token".to_string()).await;
///
/// let listing = client.list_files(None).await?;
/// println!("{} tracks at the root", listing.files.len());
/// ```
pub struct StoreClient {
    http: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl StoreClient {
    /// Create a client for the store at `base_url`.
    ///
    /// The URL must be absolute http(s); a trailing slash is removed.
    pub fn new(base_url: &str) -> Result<Self> {
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let parsed = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Amp/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// The normalized store URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Store a bearer token for subsequent requests
    pub async fn set_token(&self, token: String) {
        *self.token.write().await = Some(token);
    }

    /// Drop the stored token
    pub async fn clear_token(&self) {
        *self.token.write().await = None;
        info!("cleared store token");
    }

    /// Whether a token is currently stored
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// List the audio files and subfolders of a folder (`None` for
    /// the store root). Non-audio files are filtered out here.
    pub async fn list_files(&self, folder_id: Option<&str>) -> Result<FileListing> {
        let url = format!("{}/api/files", self.base_url);
        debug!(url = %url, folder = folder_id.unwrap_or("<root>"), "listing files");

        let mut request = self.http.get(&url);
        if let Some(folder) = folder_id {
            request = request.query(&[("folder", folder)]);
        }

        let response = self.send(request).await?;
        let listing: ListResponse = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("failed to parse file listing: {e}"))
        })?;

        let total = listing.files.len();
        let files: Vec<_> = listing
            .files
            .into_iter()
            .filter(|f| is_audio_mime(&f.mime_type))
            .map(crate::types::RawFile::into_track)
            .collect();

        debug!(
            audio = files.len(),
            skipped = total - files.len(),
            folders = listing.folders.len(),
            "listed folder"
        );

        Ok(FileListing {
            files,
            folders: listing
                .folders
                .into_iter()
                .map(crate::types::RawFolder::into_folder)
                .collect(),
        })
    }

    /// Fetch extracted metadata for a batch of track ids.
    ///
    /// Inputs beyond [`METADATA_BATCH_LIMIT`] are split into multiple
    /// requests and the results merged. An empty input returns an
    /// empty response without a request.
    pub async fn fetch_metadata(&self, ids: &[String]) -> Result<MetadataResponse> {
        if ids.is_empty() {
            return Ok(MetadataResponse::default());
        }

        let url = format!("{}/api/metadata", self.base_url);
        let mut merged = MetadataResponse::default();

        for chunk in ids.chunks(METADATA_BATCH_LIMIT) {
            debug!(url = %url, ids = chunk.len(), "fetching metadata batch");

            let request = self
                .http
                .post(&url)
                .json(&serde_json::json!({ "ids": chunk }));
            let response = self.send(request).await?;

            let batch: MetadataResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("failed to parse metadata response: {e}"))
            })?;

            merged.results.extend(batch.results);
            merged.failed.extend(batch.failed);
        }

        debug!(
            results = merged.results.len(),
            failed = merged.failed.len(),
            "fetched metadata"
        );

        Ok(merged)
    }

    /// URL for streaming a track's bytes. The store serves byte
    /// ranges, so this can be handed straight to a playback primitive.
    pub fn stream_url(&self, id: &str) -> String {
        format!("{}/api/stream/{id}", self.base_url)
    }

    /// URL for a track's embedded artwork
    pub fn art_url(&self, id: &str) -> String {
        format!("{}/api/art/{id}", self.base_url)
    }

    /// Fetch the ids of all liked tracks
    pub async fn fetch_likes(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/likes", self.base_url);
        let response = self.send(self.http.get(&url)).await?;
        let likes: LikesResponse = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("failed to parse likes response: {e}"))
        })?;
        Ok(likes.ids)
    }

    /// Mark a track as liked
    pub async fn add_like(&self, id: &str) -> Result<()> {
        let url = format!("{}/api/likes/{id}", self.base_url);
        self.send(self.http.put(&url)).await?;
        Ok(())
    }

    /// Remove a track from the liked set
    pub async fn remove_like(&self, id: &str) -> Result<()> {
        let url = format!("{}/api/likes/{id}", self.base_url);
        self.send(self.http.delete(&url)).await?;
        Ok(())
    }

    /// Attach the bearer token, send, and map transport and status
    /// errors into [`ClientError`]s.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = match self.token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ClientError::StoreUnreachable(e.to_string())
            } else {
                ClientError::Request(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else if status.as_u16() == 401 {
            Err(ClientError::AuthRequired)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::StoreError {
                status: status.as_u16(),
                message,
            })
        }
    }
}
