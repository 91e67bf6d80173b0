// Integration tests for sign conversion and playback
//
// Playback timers run under tokio's paused clock, so each test is
// deterministic and fast.

use able_service::signs::{transcribe, SignPlayer};
use std::time::Duration;

const STEP: Duration = Duration::from_millis(800);

#[test]
fn hi_maps_per_the_fixed_table() {
    assert_eq!(transcribe("hi!"), vec!["🤙", "🖐️", "!"]);
}

#[test]
fn mapping_ignores_case() {
    assert_eq!(transcribe("HI!"), transcribe("hi!"));
}

#[test]
fn unmapped_characters_pass_through() {
    assert_eq!(transcribe("ok 123"), vec!["👌", "🤘", " ", "1", "2", "3"]);
}

#[tokio::test(start_paused = true)]
async fn playback_advances_and_auto_stops() {
    let player = SignPlayer::new(STEP);
    let mut states = player.subscribe();

    let total = player.load(transcribe("hi!")).await;
    assert_eq!(total, 3);

    player.play().await;

    let initial = player.state();
    assert!(initial.playing);
    assert_eq!(initial.cursor, 0);

    let finished = states
        .wait_for(|s| !s.playing && s.total == 3)
        .await
        .unwrap()
        .clone();

    // The cursor stops on the last sign.
    assert_eq!(finished.cursor, 2);
}

#[tokio::test(start_paused = true)]
async fn restart_cancels_the_old_timer_and_rewinds() {
    let player = SignPlayer::new(STEP);
    let mut states = player.subscribe();

    player.load(transcribe("ab")).await;

    player.play().await;
    states.wait_for(|s| !s.playing).await.unwrap();
    assert_eq!(player.state().cursor, 1);

    // Restart: cursor rewinds to zero before the timer runs again.
    player.play().await;
    let restarted = player.state();
    assert!(restarted.playing);
    assert_eq!(restarted.cursor, 0);

    let finished = states.wait_for(|s| !s.playing).await.unwrap().clone();
    assert_eq!(finished.cursor, 1);
}

#[tokio::test(start_paused = true)]
async fn stop_is_idempotent_and_freezes_the_cursor() {
    let player = SignPlayer::new(STEP);
    let mut states = player.subscribe();

    player.load(transcribe("hello")).await;
    player.play().await;

    states.wait_for(|s| s.cursor >= 1).await.unwrap();

    player.stop().await;
    player.stop().await;

    let stopped = player.state();
    assert!(!stopped.playing);

    // A cancelled timer must not advance the cursor any further.
    tokio::time::sleep(STEP * 3).await;
    assert_eq!(player.state().cursor, stopped.cursor);
}

#[tokio::test(start_paused = true)]
async fn concurrent_plays_keep_one_timer() {
    let player = SignPlayer::new(STEP);
    let mut states = player.subscribe();

    player.load(transcribe("abcd")).await;
    tokio::join!(player.play(), player.play());

    // A leaked second timer would advance the cursor twice per step
    // and finish early.
    let started = tokio::time::Instant::now();
    let finished = states.wait_for(|s| !s.playing).await.unwrap().clone();
    let elapsed = started.elapsed();

    assert_eq!(finished.cursor, 3);
    assert!(elapsed >= STEP * 3, "playback finished too fast: {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn empty_sequence_never_starts_playing() {
    let player = SignPlayer::new(STEP);

    assert_eq!(player.load(Vec::new()).await, 0);
    player.play().await;

    let state = player.state();
    assert!(!state.playing);
    assert_eq!(state.total, 0);
}

#[tokio::test(start_paused = true)]
async fn loading_replaces_the_sequence_and_cancels_playback() {
    let player = SignPlayer::new(STEP);

    player.load(transcribe("hello there")).await;
    player.play().await;

    let total = player.load(transcribe("hi")).await;
    assert_eq!(total, 2);

    let state = player.state();
    assert!(!state.playing);
    assert_eq!(state.cursor, 0);
    assert_eq!(player.sequence().await, transcribe("hi"));
}
