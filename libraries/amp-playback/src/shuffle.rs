//! Shuffle for the library queue
//!
//! Uniform Fisher-Yates. Turning shuffle off does not restore the
//! pre-shuffle order; the existing order is kept as-is.

use amp_core::Track;
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Uniformly permute a track list in place
pub fn shuffle_tracks(tracks: &mut [Track]) {
    tracks.shuffle(&mut thread_rng());
}

/// Permute a track list so the current track sits at index 0 and the
/// remaining entries are a uniform permutation of the rest.
///
/// Any duplicate entries sharing the current id collapse into the
/// single entry at the front. Without a matching id this is a plain
/// shuffle.
pub fn shuffle_keeping_current(tracks: &mut Vec<Track>, current_id: &str) {
    let Some(pos) = tracks.iter().position(|t| t.id == current_id) else {
        shuffle_tracks(tracks);
        return;
    };

    let current = tracks.remove(pos);
    tracks.retain(|t| t.id != current_id);
    shuffle_tracks(tracks);
    tracks.insert(0, current);
}
