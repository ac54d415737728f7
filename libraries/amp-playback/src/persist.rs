//! Session persistence
//!
//! Volume and the last playback context are written to small JSON
//! files so a restarted session resumes where it left off. Writes are
//! best-effort: persistence failures are logged and never interrupt
//! playback. Absent or corrupt files read back as `None` and the
//! defaults apply.

use crate::error::Result;
use amp_core::Track;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const VOLUME_FILE: &str = "volume.json";
const QUEUE_FILE: &str = "queue.json";

/// Persisted volume level
#[derive(Debug, Serialize, Deserialize)]
struct SavedVolume {
    volume: f32,
}

/// Persisted playback context: the library queue as it was handed to
/// the player (pre-shuffle) and the index that was playing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueSnapshot {
    /// Library queue contents
    pub tracks: Vec<Track>,

    /// Index of the track that was current
    pub index: usize,
}

/// File-backed persistence for player settings
#[derive(Debug, Clone)]
pub struct PersistHandle {
    dir: PathBuf,
}

impl PersistHandle {
    /// Create a handle rooted at `dir`, creating the directory if
    /// needed
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Save the volume level. Best-effort.
    pub fn save_volume(&self, volume: f32) {
        self.write_json(VOLUME_FILE, &SavedVolume { volume });
    }

    /// Load the saved volume level, if a valid one exists
    pub fn load_volume(&self) -> Option<f32> {
        let saved: SavedVolume = self.read_json(VOLUME_FILE)?;
        if !saved.volume.is_finite() {
            return None;
        }
        Some(saved.volume.clamp(0.0, 1.0))
    }

    /// Save the playback context. Best-effort.
    pub fn save_queue(&self, snapshot: &QueueSnapshot) {
        self.write_json(QUEUE_FILE, snapshot);
    }

    /// Load the saved playback context, if a valid one exists
    pub fn load_queue(&self) -> Option<QueueSnapshot> {
        self.read_json(QUEUE_FILE)
    }

    fn write_json<V: Serialize>(&self, name: &str, value: &V) {
        let path = self.dir.join(name);
        let payload = match serde_json::to_vec(value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(file = name, error = %e, "failed to serialize player state");
                return;
            }
        };
        if let Err(e) = fs::write(&path, payload) {
            warn!(path = %path.display(), error = %e, "failed to persist player state");
        }
    }

    fn read_json<V: for<'de> Deserialize<'de>>(&self, name: &str) -> Option<V> {
        let path = self.dir.join(name);
        let bytes = fs::read(&path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "ignoring corrupt player state file");
                None
            }
        }
    }
}
