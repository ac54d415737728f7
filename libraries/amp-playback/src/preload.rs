//! Next-track preloading
//!
//! Once the current track is actually playing (not merely requested),
//! the projected next track is warmed through the transport so the
//! handoff at track end starts with bytes already buffered. Waiting
//! for confirmed playback avoids wasted fetches on rapid skips.

use crate::transport::Transport;
use amp_core::Track;
use tracing::debug;

/// Tracks which resource has already been warmed.
///
/// The marker is keyed by track id so repeated `Playing` events (or
/// repeated projections of the same track) never trigger a redundant
/// fetch. It is invalidated whenever the current track changes, and
/// a changed projection re-warms implicitly because the id differs.
#[derive(Debug, Default)]
pub struct Preloader {
    warmed: Option<String>,
}

impl Preloader {
    /// Create a preloader with no warmed resource
    pub fn new() -> Self {
        Self::default()
    }

    /// Warm `projected` unless it was already warmed.
    ///
    /// Returns `true` if a warm command was issued.
    pub fn warm_if_new<T: Transport>(&mut self, projected: Option<&Track>, transport: &mut T) -> bool {
        let Some(track) = projected else {
            return false;
        };

        if self.warmed.as_deref() == Some(track.id.as_str()) {
            return false;
        }

        debug!(track_id = %track.id, "warming projected next track");
        if let Err(e) = transport.warm(track) {
            // Preloading is best-effort; a failed warm just means a
            // cold start at the next transition.
            debug!(track_id = %track.id, error = %e, "preload warm failed");
        }

        self.warmed = Some(track.id.clone());
        true
    }

    /// Forget the warmed marker (new playback context or the current
    /// track changed)
    pub fn invalidate(&mut self) {
        self.warmed = None;
    }

    /// ID of the last warmed track, if any
    pub fn warmed_id(&self) -> Option<&str> {
        self.warmed.as_deref()
    }
}
