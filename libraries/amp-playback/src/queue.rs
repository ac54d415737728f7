//! Two-tier queue bookkeeping
//!
//! The player draws from two queues:
//! - Library queue: the play order of the active browsing context
//!   (a folder or the liked list), navigated by index.
//! - User queue: manually queued tracks, strictly FIFO, consumed
//!   front-to-back and never reordered automatically.

use amp_core::{Track, TrackMetadata};
use std::collections::{HashMap, VecDeque};

/// Queue state owned by the player
///
/// `position` is the index of the *current* track within the library
/// queue, `None` when nothing has played from a library context yet.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    /// Play order for the active browsing context
    library: Vec<Track>,

    /// Index of the current track within `library`
    position: Option<usize>,

    /// Manually queued tracks (FIFO)
    user: VecDeque<Track>,
}

impl Queue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the library queue and current position
    pub fn set_library(&mut self, tracks: Vec<Track>, position: Option<usize>) {
        debug_assert!(position.map_or(true, |i| i < tracks.len()) || tracks.is_empty());
        self.library = tracks;
        self.position = position;
    }

    /// Library queue in play order
    pub fn library(&self) -> &[Track] {
        &self.library
    }

    /// Mutable library queue (for shuffling in place)
    pub(crate) fn library_mut(&mut self) -> &mut Vec<Track> {
        &mut self.library
    }

    /// Current position within the library queue
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Set the current position
    pub(crate) fn set_position(&mut self, position: Option<usize>) {
        self.position = position;
    }

    /// Advance to the next library track.
    ///
    /// A position of `None` advances to index 0 (nothing has played
    /// yet). Past the end: wraps to 0 when `wrap` is set, otherwise
    /// leaves the position untouched and returns `None`.
    pub fn advance(&mut self, wrap: bool) -> Option<&Track> {
        let next = self.position.map_or(0, |i| i + 1);

        let next = if next < self.library.len() {
            next
        } else if wrap && !self.library.is_empty() {
            0
        } else {
            return None;
        };

        self.position = Some(next);
        Some(&self.library[next])
    }

    /// Step back to the previous library track.
    ///
    /// At index 0 (or before anything played): wraps to the last
    /// index when `wrap` is set, otherwise a no-op returning `None`.
    pub fn retreat(&mut self, wrap: bool) -> Option<&Track> {
        let prev = match self.position {
            Some(i) if i > 0 => i - 1,
            _ if wrap && !self.library.is_empty() => self.library.len() - 1,
            _ => return None,
        };

        self.position = Some(prev);
        Some(&self.library[prev])
    }

    /// Peek at the library track that would play next, without moving
    pub fn peek_next_library(&self, wrap: bool) -> Option<&Track> {
        let next = self.position.map_or(0, |i| i + 1);

        if next < self.library.len() {
            self.library.get(next)
        } else if wrap {
            self.library.first()
        } else {
            None
        }
    }

    /// Append a track to the user queue tail
    pub fn push_user(&mut self, track: Track) {
        self.user.push_back(track);
    }

    /// User queue front-to-back
    pub fn user(&self) -> &VecDeque<Track> {
        &self.user
    }

    /// User queue length
    pub fn user_len(&self) -> usize {
        self.user.len()
    }

    /// Consume the front of the user queue
    pub fn pop_user_front(&mut self) -> Option<Track> {
        self.user.pop_front()
    }

    /// Remove and return the user-queue entry at `index`, preserving
    /// the order of the remaining entries. Out of range returns `None`.
    pub fn take_user(&mut self, index: usize) -> Option<Track> {
        if index < self.user.len() {
            self.user.remove(index)
        } else {
            None
        }
    }

    /// Remove the user-queue entry at `index`; silent no-op out of range
    pub fn remove_user(&mut self, index: usize) -> bool {
        self.take_user(index).is_some()
    }

    /// Empty the user queue unconditionally
    pub fn clear_user(&mut self) {
        self.user.clear();
    }

    /// Merge metadata patches into every entry of both tiers.
    ///
    /// Returns the IDs whose records actually changed.
    pub fn apply_metadata(&mut self, patches: &HashMap<String, TrackMetadata>) -> Vec<String> {
        let mut changed = Vec::new();

        for track in self.library.iter_mut().chain(self.user.iter_mut()) {
            if let Some(meta) = patches.get(&track.id) {
                if track.apply(meta) && !changed.contains(&track.id) {
                    changed.push(track.id.clone());
                }
            }
        }

        changed
    }
}
