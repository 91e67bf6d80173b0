// Integration tests for the speech I/O lifecycle

use able_service::speech::{
    ListeningSession, LogSpeaker, RecognizerOptions, ScriptedTranscriber, Speaker,
    UnsupportedTranscriber,
};
use able_service::{Notifier, NoticeSeverity};
use std::time::Duration;
use tokio::time::timeout;

fn scripted_session(script: Vec<(&str, bool)>) -> ListeningSession {
    let script = script
        .into_iter()
        .map(|(text, interim)| (text.to_string(), interim))
        .collect();

    ListeningSession::new(
        Box::new(ScriptedTranscriber::new(script)),
        RecognizerOptions::default(),
        Notifier::new(),
    )
}

#[tokio::test(start_paused = true)]
async fn listening_accumulates_final_results_only() {
    let session = scripted_session(vec![
        ("hello", false),
        ("hel...", true),
        ("world", false),
    ]);

    session.start().await.unwrap();
    assert!(session.is_listening());

    timeout(Duration::from_secs(60), async {
        while session.transcript().await != "hello world" {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("transcript never accumulated");

    session.stop().await.unwrap();
    assert!(!session.is_listening());

    // Stop again: idempotent.
    session.stop().await.unwrap();
}

#[tokio::test]
async fn starting_twice_is_a_noop() {
    let session = scripted_session(vec![("hi", false)]);

    session.start().await.unwrap();
    session.start().await.unwrap();
    assert!(session.is_listening());

    session.stop().await.unwrap();
}

#[tokio::test]
async fn unsupported_engine_surfaces_a_notice() {
    let notifier = Notifier::new();
    let mut notices = notifier.subscribe();

    let session = ListeningSession::new(
        Box::new(UnsupportedTranscriber),
        RecognizerOptions::default(),
        notifier.clone(),
    );

    assert!(session.start().await.is_err());
    assert!(!session.is_listening());

    let notice = notices.recv().await.unwrap();
    assert_eq!(notice.severity, NoticeSeverity::Error);
    assert_eq!(notice.title, "Speech Recognition Not Supported");
}

#[tokio::test(start_paused = true)]
async fn clear_empties_the_transcript() {
    let session = scripted_session(vec![("something", false)]);

    session.start().await.unwrap();
    timeout(Duration::from_secs(60), async {
        while session.transcript().await.is_empty() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();

    session.stop().await.unwrap();
    session.clear().await;
    assert_eq!(session.transcript().await, "");
}

#[tokio::test]
async fn speaking_empty_text_is_rejected() {
    let speaker = LogSpeaker::new();
    assert!(speaker.speak("   ").await.is_err());
    assert!(!speaker.is_speaking());
}

#[tokio::test(start_paused = true)]
async fn utterances_finish_on_their_own() {
    let speaker = LogSpeaker::new();

    speaker.speak("hello").await.unwrap();
    assert!(speaker.is_speaking());

    // 5 chars at 40ms each; well past that the flag must clear.
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(!speaker.is_speaking());
}

#[tokio::test(start_paused = true)]
async fn cancel_silences_the_current_utterance() {
    let speaker = LogSpeaker::new();

    speaker.speak("a longer utterance to cancel").await.unwrap();
    speaker.cancel().await.unwrap();
    assert!(!speaker.is_speaking());

    // Cancel again: idempotent.
    speaker.cancel().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn a_new_utterance_replaces_the_old_one() {
    let speaker = LogSpeaker::new();

    speaker.speak("first").await.unwrap();
    speaker.speak("second").await.unwrap();
    assert!(speaker.is_speaking());

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(!speaker.is_speaking());
}
