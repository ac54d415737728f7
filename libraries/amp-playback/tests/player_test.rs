//! End-to-end scenarios for the playback engine driven purely
//! through the public API.

use amp_core::{Track, TrackMetadata};
use amp_playback::{
    PersistHandle, Player, PlayerConfig, RepeatMode, Result, Transport, TransportEvent,
    SEEK_DEBOUNCE,
};
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

struct NullTransport;

impl Transport for NullTransport {
    fn load(&mut self, _track: &Track) -> Result<()> {
        Ok(())
    }
    fn play(&mut self) -> Result<()> {
        Ok(())
    }
    fn pause(&mut self) -> Result<()> {
        Ok(())
    }
    fn seek(&mut self, _seconds: f64) -> Result<()> {
        Ok(())
    }
    fn set_volume(&mut self, _volume: f32) -> Result<()> {
        Ok(())
    }
    fn set_muted(&mut self, _muted: bool) -> Result<()> {
        Ok(())
    }
    fn warm(&mut self, _track: &Track) -> Result<()> {
        Ok(())
    }
}

fn track(id: &str) -> Track {
    Track::new(id, format!("{id}.flac"), "audio/flac")
}

fn library(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

fn player() -> Player<NullTransport> {
    Player::new(NullTransport, PlayerConfig::default())
}

fn current_id(player: &Player<NullTransport>) -> String {
    player.current_track().map(|t| t.id.clone()).unwrap_or_default()
}

#[test]
fn manual_next_walks_library_and_stops_at_end() {
    let mut player = player();
    player.play_track(track("a"), library(&["a", "b", "c"]), 0);

    let mut seen = vec![current_id(&player)];
    for _ in 0..3 {
        player.next_track();
        seen.push(current_id(&player));
    }

    // Third press is a no-op with repeat off
    assert_eq!(seen, vec!["a", "b", "c", "c"]);
}

#[test]
fn manual_next_wraps_under_repeat_all() {
    let mut player = player();
    player.play_track(track("c"), library(&["a", "b", "c"]), 2);
    player.set_repeat(RepeatMode::All);

    player.next_track();
    assert_eq!(current_id(&player), "a");
}

#[test]
fn ended_resolution_precedence() {
    let mut player = player();
    player.play_track(track("a"), library(&["a", "b"]), 0);
    player.add_to_queue(track("q1"));
    player.add_to_queue(track("q2"));

    // User queue drains first, then the library resumes where it was
    player.on_transport_event(TransportEvent::Ended);
    assert_eq!(current_id(&player), "q1");
    player.on_transport_event(TransportEvent::Ended);
    assert_eq!(current_id(&player), "q2");
    player.on_transport_event(TransportEvent::Ended);
    assert_eq!(current_id(&player), "b");
}

#[test]
fn repeat_one_beats_user_queue_on_ended_but_not_on_skip() {
    let mut player = player();
    player.play_track(track("a"), library(&["a", "b"]), 0);
    player.set_repeat(RepeatMode::One);
    player.add_to_queue(track("q"));

    player.on_transport_event(TransportEvent::Ended);
    assert_eq!(current_id(&player), "a");
    assert_eq!(player.queue().user_len(), 1);

    player.next_track();
    assert_eq!(current_id(&player), "q");
    assert_eq!(player.queue().user_len(), 0);
}

#[test]
fn ended_at_library_end_retains_current_and_resets_position() {
    let mut player = player();
    player.play_track(track("b"), library(&["a", "b"]), 1);
    player.on_transport_event(TransportEvent::Playing);
    player.on_transport_event(TransportEvent::TimeUpdate(42.0));

    player.on_transport_event(TransportEvent::Ended);

    assert_eq!(current_id(&player), "b");
    assert!(!player.is_playing());
    assert_eq!(player.position(), 0.0);
}

#[test]
fn prev_track_scrub_back_threshold() {
    let mut player = player();
    player.play_track(track("b"), library(&["a", "b"]), 1);

    // Deep into the track: restart, index unchanged
    player.on_transport_event(TransportEvent::TimeUpdate(5.0));
    player.prev_track();
    assert_eq!(current_id(&player), "b");
    assert_eq!(player.queue().position(), Some(1));

    // Early in the track: move back
    player.on_transport_event_at(
        TransportEvent::TimeUpdate(1.0),
        Instant::now() + SEEK_DEBOUNCE + Duration::from_millis(10),
    );
    player.prev_track();
    assert_eq!(current_id(&player), "a");
}

#[test]
fn shuffle_on_preserves_membership_and_pins_current() {
    let mut player = player();
    let ids = ["a", "b", "c", "d", "e", "f"];
    player.play_track(track("c"), library(&ids), 2);

    player.toggle_shuffle();

    assert!(player.shuffle());
    assert_eq!(player.queue().position(), Some(0));
    assert_eq!(player.queue().library()[0].id, "c");
    let shuffled: HashSet<String> = player
        .queue()
        .library()
        .iter()
        .map(|t| t.id.clone())
        .collect();
    assert_eq!(shuffled.len(), ids.len());

    // Turning shuffle off keeps whatever order exists
    let order_before: Vec<String> = player
        .queue()
        .library()
        .iter()
        .map(|t| t.id.clone())
        .collect();
    player.toggle_shuffle();
    let order_after: Vec<String> = player
        .queue()
        .library()
        .iter()
        .map(|t| t.id.clone())
        .collect();
    assert!(!player.shuffle());
    assert_eq!(order_before, order_after);
}

#[test]
fn shuffle_on_pins_user_queue_sourced_current() {
    let mut player = player();
    player.play_track(track("a"), library(&["a", "b", "c"]), 0);
    player.add_to_queue(track("q"));
    player.play_from_queue(0);
    assert_eq!(current_id(&player), "q");

    player.toggle_shuffle();

    // The current track joins the library at the front even though
    // it was never part of the browsing context
    assert_eq!(player.queue().position(), Some(0));
    assert_eq!(player.queue().library()[0].id, "q");
    let ids: HashSet<&str> = player
        .queue()
        .library()
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, HashSet::from(["q", "a", "b", "c"]));
}

#[test]
fn play_from_queue_keeps_library_position() {
    let mut player = player();
    player.play_track(track("b"), library(&["a", "b", "c"]), 1);
    player.add_to_queue(track("q1"));
    player.add_to_queue(track("q2"));
    player.add_to_queue(track("q3"));

    player.play_from_queue(1);

    assert_eq!(current_id(&player), "q2");
    assert_eq!(player.queue().position(), Some(1));
    let remaining: Vec<&str> = player.queue().user().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(remaining, vec!["q1", "q3"]);
}

#[test]
fn remove_from_queue_out_of_range_is_noop() {
    let mut player = player();
    player.add_to_queue(track("q1"));

    player.remove_from_queue(5);
    assert_eq!(player.queue().user_len(), 1);

    player.remove_from_queue(0);
    assert_eq!(player.queue().user_len(), 0);
}

#[test]
fn metadata_update_is_atomic_across_holders() {
    let mut player = player();
    player.play_track(track("a"), library(&["a", "b"]), 0);
    player.add_to_queue(track("b"));

    let mut patches = HashMap::new();
    patches.insert(
        "a".to_string(),
        TrackMetadata {
            title: Some("Alpha".to_string()),
            artist: None,
            album: Some("Album".to_string()),
        },
    );
    patches.insert(
        "b".to_string(),
        TrackMetadata {
            title: Some("Beta".to_string()),
            artist: Some("Band".to_string()),
            album: None,
        },
    );

    assert!(player.update_metadata(&patches));
    assert_eq!(player.current_track().unwrap().title.as_deref(), Some("Alpha"));
    assert_eq!(player.queue().library()[1].title.as_deref(), Some("Beta"));
    assert_eq!(player.queue().user()[0].artist.as_deref(), Some("Band"));

    // Unknown ids change nothing
    let mut unknown = HashMap::new();
    unknown.insert(
        "zz".to_string(),
        TrackMetadata {
            title: Some("Ghost".to_string()),
            artist: None,
            album: None,
        },
    );
    assert!(!player.update_metadata(&unknown));
}

#[test]
fn seek_debounce_window_suppresses_stale_positions() {
    let mut player = player();
    player.play_track(track("a"), library(&["a"]), 0);
    player.on_transport_event(TransportEvent::DurationChange(200.0));

    let seeked_at = Instant::now();
    player.seek(120.0);
    assert_eq!(player.position(), 120.0);

    player.on_transport_event_at(
        TransportEvent::TimeUpdate(3.0),
        seeked_at + Duration::from_millis(100),
    );
    assert_eq!(player.position(), 120.0);

    player.on_transport_event_at(
        TransportEvent::TimeUpdate(121.0),
        seeked_at + SEEK_DEBOUNCE + Duration::from_millis(50),
    );
    assert_eq!(player.position(), 121.0);
}

#[test]
fn seek_is_clamped_to_duration() {
    let mut player = player();
    player.play_track(track("a"), library(&["a"]), 0);
    player.on_transport_event(TransportEvent::DurationChange(100.0));

    player.seek(500.0);
    assert_eq!(player.position(), 100.0);

    player.seek(-5.0);
    assert_eq!(player.position(), 0.0);
}

#[test]
fn volume_persists_and_restores_across_sessions() {
    let dir = tempfile::tempdir().unwrap();

    {
        let persist = PersistHandle::new(dir.path()).unwrap();
        let mut player = Player::new(NullTransport, PlayerConfig::default())
            .with_persistence(persist);
        player.set_volume(0.25);
    }

    let persist = PersistHandle::new(dir.path()).unwrap();
    let player = Player::new(NullTransport, PlayerConfig::default()).with_persistence(persist);
    assert_eq!(player.volume(), 0.25);
}

#[test]
fn queue_snapshot_restores_paused_session() {
    let dir = tempfile::tempdir().unwrap();

    {
        let persist = PersistHandle::new(dir.path()).unwrap();
        let mut player = Player::new(NullTransport, PlayerConfig::default())
            .with_persistence(persist);
        player.play_track(track("b"), library(&["a", "b", "c"]), 1);
    }

    let persist = PersistHandle::new(dir.path()).unwrap();
    let snapshot = persist.load_queue().unwrap();
    let mut player = Player::new(NullTransport, PlayerConfig::default());
    player.restore(snapshot);

    assert_eq!(current_id(&player), "b");
    assert_eq!(player.queue().position(), Some(1));
    assert!(!player.is_playing());
}

#[test]
fn toggle_play_without_track_is_noop() {
    let mut player = player();
    player.toggle_play();
    assert!(!player.is_playing());
    assert!(player.current_track().is_none());
}

#[test]
fn events_are_drained_in_order() {
    let mut player = player();
    player.play_track(track("a"), library(&["a", "b"]), 0);
    player.on_transport_event(TransportEvent::Playing);
    player.add_to_queue(track("q"));

    let events = player.take_events();
    assert!(!events.is_empty());
    // Drained once, gone
    assert!(player.take_events().is_empty());
}
