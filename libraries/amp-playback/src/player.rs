//! Player state machine
//!
//! Single authority over all transport state and queue composition.
//! Every mutation is one atomic transition computed from the current
//! state; user actions, transport events, and metadata arrival all
//! route through the `&mut self` methods here, so the embedding
//! application serializes them by construction (one owner, or a
//! mutex/actor around the player).
//!
//! The player performs no I/O of its own. It issues fire-and-forget
//! commands to the [`Transport`] and reacts to the events the
//! primitive emits; a play request that fails surfaces as playback
//! never confirming, not as an error from these methods.

use crate::events::PlayerEvent;
use crate::persist::{PersistHandle, QueueSnapshot};
use crate::preload::Preloader;
use crate::queue::Queue;
use crate::shuffle::{shuffle_keeping_current, shuffle_tracks};
use crate::transport::{Transport, TransportEvent, SEEK_DEBOUNCE};
use crate::types::{PlayerConfig, RepeatMode};
use crate::volume::Volume;
use amp_core::{Track, TrackMetadata};
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

/// Pressing previous more than this far into a track restarts it
/// instead of moving back through the queue.
const SCRUB_BACK_THRESHOLD_SECS: f64 = 3.0;

/// The playback engine and queue state machine.
///
/// Owns the current track, both queue tiers, shuffle/repeat modes,
/// volume, and transport position bookkeeping. See the module docs
/// for the concurrency contract.
pub struct Player<T: Transport> {
    transport: T,
    current: Option<Track>,
    queue: Queue,
    volume: Volume,
    shuffle: bool,
    repeat: RepeatMode,
    is_playing: bool,
    position: f64,
    duration: f64,
    preloader: Preloader,
    persist: Option<PersistHandle>,
    pending_events: Vec<PlayerEvent>,
    last_seek: Option<Instant>,
}

impl<T: Transport> Player<T> {
    /// Create a player around a transport
    pub fn new(mut transport: T, config: PlayerConfig) -> Self {
        let volume = Volume::new(config.volume);
        if let Err(e) = transport.set_volume(volume.level()) {
            debug!(error = %e, "initial volume command failed");
        }

        Self {
            transport,
            current: None,
            queue: Queue::new(),
            volume,
            shuffle: config.shuffle,
            repeat: config.repeat,
            is_playing: false,
            position: 0.0,
            duration: 0.0,
            preloader: Preloader::new(),
            persist: None,
            pending_events: Vec::new(),
            last_seek: None,
        }
    }

    /// Attach a persistence handle and restore the saved volume
    pub fn with_persistence(mut self, persist: PersistHandle) -> Self {
        if let Some(saved) = persist.load_volume() {
            self.volume.set_level(saved);
            if let Err(e) = self.transport.set_volume(self.volume.level()) {
                debug!(error = %e, "restored volume command failed");
            }
        }
        self.persist = Some(persist);
        self
    }

    // ===== Playback control =====

    /// Play `track` out of a browsing context.
    ///
    /// The context becomes the library queue (shuffled with the
    /// chosen track first when shuffle is on). An out-of-range index
    /// with shuffle off is invalid input and a no-op.
    pub fn play_track(&mut self, track: Track, context: Vec<Track>, index: usize) {
        if !self.shuffle && index >= context.len() {
            debug!(index, len = context.len(), "play_track index out of range");
            return;
        }
        self.save_queue_snapshot(&context, index);

        let (library, position) = if self.shuffle {
            let mut ordered = context;
            shuffle_keeping_current(&mut ordered, &track.id);
            (ordered, Some(0))
        } else {
            (context, Some(index))
        };

        self.queue.set_library(library, position);
        self.start_playback(track);
    }

    /// Play a whole track list from the top, optionally shuffled.
    /// Empty input is a no-op.
    pub fn play_all(&mut self, tracks: Vec<Track>, shuffled: bool) {
        if tracks.is_empty() {
            return;
        }

        if self.shuffle != shuffled {
            self.shuffle = shuffled;
            self.pending_events
                .push(PlayerEvent::ShuffleChanged { shuffle: shuffled });
        }

        let mut ordered = tracks;
        if shuffled {
            shuffle_tracks(&mut ordered);
        }

        let first = ordered[0].clone();
        self.save_queue_snapshot(&ordered, 0);
        self.queue.set_library(ordered, Some(0));
        self.start_playback(first);
    }

    /// Toggle between play and pause. No-op without a current track.
    pub fn toggle_play(&mut self) {
        if self.current.is_none() {
            return;
        }

        let result = if self.is_playing {
            self.transport.pause()
        } else {
            self.transport.play()
        };
        if let Err(e) = result {
            debug!(error = %e, "toggle_play transport command failed");
        }
    }

    /// Seek to a position in the current track (seconds)
    pub fn seek(&mut self, seconds: f64) {
        if self.current.is_none() {
            return;
        }

        let target = if self.duration > 0.0 {
            seconds.clamp(0.0, self.duration)
        } else {
            seconds.max(0.0)
        };

        if let Err(e) = self.transport.seek(target) {
            debug!(error = %e, "seek command failed");
        }
        self.position = target;
        self.last_seek = Some(Instant::now());
        self.pending_events.push(PlayerEvent::PositionUpdate {
            position: self.position,
            duration: self.duration,
        });
    }

    /// Skip to the next track: user queue front first, then the next
    /// library index (wrapping only under repeat-all). A manual skip
    /// ignores repeat-one. At the end of the library with repeat off
    /// this is a no-op.
    pub fn next_track(&mut self) {
        if let Some(track) = self.queue.pop_user_front() {
            self.emit_queue_changed();
            self.start_playback(track);
            return;
        }

        let wrap = self.repeat == RepeatMode::All;
        if let Some(next) = self.queue.advance(wrap).cloned() {
            self.start_playback(next);
        }
    }

    /// Previous track, with a scrub-back affordance: more than three
    /// seconds into the current track restarts it instead of moving
    /// the index.
    pub fn prev_track(&mut self) {
        if self.position > SCRUB_BACK_THRESHOLD_SECS {
            self.seek(0.0);
            return;
        }

        let wrap = self.repeat == RepeatMode::All;
        if let Some(prev) = self.queue.retreat(wrap).cloned() {
            self.start_playback(prev);
        }
    }

    // ===== Shuffle & repeat =====

    /// Flip shuffle. Turning it on pins the current track at index 0
    /// and uniformly permutes the rest of the library queue. Turning
    /// it off keeps the existing order (no restoration).
    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;

        if self.shuffle && !self.queue.library().is_empty() {
            match self.current.clone() {
                Some(current) => {
                    shuffle_keeping_current(self.queue.library_mut(), &current.id);
                    // A current track consumed from the user queue is
                    // not in the library; pin it first anyway so the
                    // position stays truthful.
                    if self
                        .queue
                        .library()
                        .first()
                        .map_or(true, |t| t.id != current.id)
                    {
                        self.queue.library_mut().insert(0, current);
                    }
                    self.queue.set_position(Some(0));
                }
                None => {
                    shuffle_tracks(self.queue.library_mut());
                    self.queue.set_position(None);
                }
            }
        }

        self.pending_events.push(PlayerEvent::ShuffleChanged {
            shuffle: self.shuffle,
        });
        self.refresh_preload();
    }

    /// Advance repeat through off -> all -> one -> off
    pub fn cycle_repeat(&mut self) {
        self.set_repeat(self.repeat.cycle());
    }

    /// Set the repeat mode directly
    pub fn set_repeat(&mut self, repeat: RepeatMode) {
        if self.repeat == repeat {
            return;
        }
        self.repeat = repeat;
        self.pending_events.push(PlayerEvent::RepeatChanged { repeat });
        self.refresh_preload();
    }

    // ===== User queue =====

    /// Append a track to the user queue tail
    pub fn add_to_queue(&mut self, track: Track) {
        self.queue.push_user(track);
        self.emit_queue_changed();
        self.refresh_preload();
    }

    /// Remove the user-queue entry at `index`; silent no-op out of range
    pub fn remove_from_queue(&mut self, index: usize) {
        if self.queue.remove_user(index) {
            self.emit_queue_changed();
            self.refresh_preload();
        }
    }

    /// Empty the user queue unconditionally
    pub fn clear_queue(&mut self) {
        self.queue.clear_user();
        self.emit_queue_changed();
        self.refresh_preload();
    }

    /// Play the user-queue entry at `index`, removing it and
    /// preserving the order of the remaining entries. Out of range is
    /// a no-op. Library queue and position are untouched.
    pub fn play_from_queue(&mut self, index: usize) {
        if let Some(track) = self.queue.take_user(index) {
            self.emit_queue_changed();
            self.start_playback(track);
        }
    }

    // ===== Volume =====

    /// Set the volume (clamped to [0, 1]). Also clears mute, matching
    /// the behavior of dragging a volume slider.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume.set_level(volume);
        self.volume.unmute();

        if let Err(e) = self.transport.set_volume(self.volume.level()) {
            debug!(error = %e, "volume command failed");
        }
        if let Err(e) = self.transport.set_muted(false) {
            debug!(error = %e, "unmute command failed");
        }

        if let Some(persist) = &self.persist {
            persist.save_volume(self.volume.level());
        }
        self.emit_volume_changed();
    }

    /// Mute, preserving the stored volume level
    pub fn mute(&mut self) {
        self.volume.mute();
        if let Err(e) = self.transport.set_muted(true) {
            debug!(error = %e, "mute command failed");
        }
        self.emit_volume_changed();
    }

    /// Unmute, restoring the stored volume level exactly
    pub fn unmute(&mut self) {
        self.volume.unmute();
        if let Err(e) = self.transport.set_muted(false) {
            debug!(error = %e, "unmute command failed");
        }
        self.emit_volume_changed();
    }

    /// Toggle mute
    pub fn toggle_mute(&mut self) {
        if self.volume.is_muted() {
            self.unmute();
        } else {
            self.mute();
        }
    }

    // ===== Metadata =====

    /// Merge metadata patches into the current track and every entry
    /// of both queues sharing an id, atomically.
    ///
    /// An empty map is a strict no-op: no event, no recomputation.
    /// Returns whether anything changed.
    pub fn update_metadata(&mut self, patches: &HashMap<String, TrackMetadata>) -> bool {
        if patches.is_empty() {
            return false;
        }

        let mut changed = self.queue.apply_metadata(patches);
        if let Some(current) = self.current.as_mut() {
            if let Some(meta) = patches.get(&current.id) {
                if current.apply(meta) && !changed.contains(&current.id) {
                    changed.push(current.id.clone());
                }
            }
        }

        if changed.is_empty() {
            return false;
        }
        self.pending_events
            .push(PlayerEvent::MetadataUpdated { track_ids: changed });
        true
    }

    // ===== Transport events =====

    /// Feed a transport event into the state machine
    pub fn on_transport_event(&mut self, event: TransportEvent) {
        self.on_transport_event_at(event, Instant::now());
    }

    /// Feed a transport event with an explicit timestamp.
    ///
    /// The timestamp only matters for the post-seek debounce of
    /// `TimeUpdate`; exposed for tests and event replay.
    pub fn on_transport_event_at(&mut self, event: TransportEvent, now: Instant) {
        match event {
            TransportEvent::TimeUpdate(seconds) => {
                if let Some(seeked_at) = self.last_seek {
                    if now.saturating_duration_since(seeked_at) < SEEK_DEBOUNCE {
                        // Transient position while the primitive is
                        // still settling after a programmatic seek.
                        return;
                    }
                    self.last_seek = None;
                }
                self.position = seconds;
                self.pending_events.push(PlayerEvent::PositionUpdate {
                    position: self.position,
                    duration: self.duration,
                });
            }
            TransportEvent::DurationChange(seconds) => {
                self.duration = if seconds.is_finite() && seconds > 0.0 {
                    seconds
                } else {
                    0.0
                };
            }
            TransportEvent::Playing => {
                if !self.is_playing {
                    self.is_playing = true;
                    self.pending_events
                        .push(PlayerEvent::StateChanged { is_playing: true });
                }
                self.refresh_preload();
            }
            TransportEvent::Paused => {
                if self.is_playing {
                    self.is_playing = false;
                    self.pending_events
                        .push(PlayerEvent::StateChanged { is_playing: false });
                }
            }
            TransportEvent::Ended => self.handle_ended(),
        }
    }

    /// Track-ended resolution, in fixed precedence order:
    /// repeat-one restart, then the user queue front, then the next
    /// library index (wrapping under repeat-all, else stopping while
    /// retaining the last track).
    fn handle_ended(&mut self) {
        if self.repeat == RepeatMode::One && self.current.is_some() {
            self.position = 0.0;
            if let Err(e) = self.transport.seek(0.0) {
                debug!(error = %e, "repeat-one restart seek failed");
            }
            if let Err(e) = self.transport.play() {
                debug!(error = %e, "repeat-one restart play failed");
            }
            return;
        }

        if let Some(track) = self.queue.pop_user_front() {
            self.emit_queue_changed();
            self.start_playback(track);
            return;
        }

        let wrap = self.repeat == RepeatMode::All;
        if let Some(next) = self.queue.advance(wrap).cloned() {
            self.start_playback(next);
        } else {
            // End of the library: keep the last track visible, show
            // it as ended.
            self.is_playing = false;
            self.position = 0.0;
            self.preloader.invalidate();
            self.pending_events
                .push(PlayerEvent::StateChanged { is_playing: false });
        }
    }

    // ===== Projections & state queries =====

    /// The track that would play next under the current state,
    /// without committing to it: user queue front, else the next
    /// library track (wrapping only under repeat-all).
    pub fn projected_next(&self) -> Option<&Track> {
        if let Some(front) = self.queue.user().front() {
            return Some(front);
        }
        self.queue.peek_next_library(self.repeat == RepeatMode::All)
    }

    /// Currently loaded track, if any
    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// Whether the primitive has confirmed playback
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Playback position in seconds
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current track duration in seconds (0.0 when unknown)
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Volume level (0.0-1.0), independent of mute
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Mute state
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Shuffle state
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Queue state (both tiers)
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Drain buffered events for UI synchronization
    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Session restore =====

    /// Restore a persisted queue snapshot without starting playback.
    ///
    /// Loads the track at the saved index so the session resumes
    /// paused where it left off. An empty snapshot is a no-op.
    pub fn restore(&mut self, snapshot: QueueSnapshot) {
        if snapshot.tracks.is_empty() {
            return;
        }

        let index = snapshot.index.min(snapshot.tracks.len() - 1);
        let track = snapshot.tracks[index].clone();
        self.queue.set_library(snapshot.tracks, Some(index));
        self.preloader.invalidate();

        let previous_track_id = self.current.as_ref().map(|t| t.id.clone());
        self.position = 0.0;
        self.duration = track.duration_seconds.unwrap_or(0.0);
        if let Err(e) = self.transport.load(&track) {
            debug!(error = %e, track_id = %track.id, "restore load failed");
        }
        self.pending_events.push(PlayerEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
        });
        self.current = Some(track);
    }

    // ===== Internals =====

    /// Make `track` current and command the transport to load and
    /// play it. Invalidates the preload marker: a new current track
    /// voids all preload assumptions.
    fn start_playback(&mut self, track: Track) {
        self.preloader.invalidate();
        self.position = 0.0;
        self.duration = track.duration_seconds.unwrap_or(0.0);
        self.last_seek = None;

        if let Err(e) = self.transport.load(&track) {
            debug!(error = %e, track_id = %track.id, "load command failed");
        }
        if let Err(e) = self.transport.play() {
            // Swallowed: a failed play surfaces as is_playing never
            // confirming, not as an error.
            debug!(error = %e, track_id = %track.id, "play command failed");
        }

        let previous_track_id = self.current.as_ref().map(|t| t.id.clone());
        self.pending_events.push(PlayerEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
        });
        self.current = Some(track);
    }

    /// Warm the projected next track once the current one is
    /// confirmed playing. Keyed by id, so an unchanged projection
    /// never re-fetches.
    fn refresh_preload(&mut self) {
        if !self.is_playing {
            return;
        }
        let projected = self.projected_next().cloned();
        self.preloader
            .warm_if_new(projected.as_ref(), &mut self.transport);
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlayerEvent::QueueChanged {
            user_queue_len: self.queue.user_len(),
        });
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(PlayerEvent::VolumeChanged {
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    fn save_queue_snapshot(&self, tracks: &[Track], index: usize) {
        if let Some(persist) = &self.persist {
            persist.save_queue(&QueueSnapshot {
                tracks: tracks.to_vec(),
                index,
            });
        }
    }
}
