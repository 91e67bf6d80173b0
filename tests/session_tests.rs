// Integration tests for the capture session lifecycle
//
// These use the synthetic media backend plus a scripted detector, so
// every timer interaction runs under tokio's paused clock and is
// deterministic.

use able_service::{
    CaptureError, CaptureSession, Gesture, MediaConstraints, MediaFrame, Notifier, NoticeSeverity,
    SessionConfig, SignDetector, SyntheticBackend,
};
use anyhow::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

const TEST_GESTURES: [Gesture; 12] = [
    Gesture { symbol: "g0", label: "zero" },
    Gesture { symbol: "g1", label: "one" },
    Gesture { symbol: "g2", label: "two" },
    Gesture { symbol: "g3", label: "three" },
    Gesture { symbol: "g4", label: "four" },
    Gesture { symbol: "g5", label: "five" },
    Gesture { symbol: "g6", label: "six" },
    Gesture { symbol: "g7", label: "seven" },
    Gesture { symbol: "g8", label: "eight" },
    Gesture { symbol: "g9", label: "nine" },
    Gesture { symbol: "g10", label: "ten" },
    Gesture { symbol: "g11", label: "eleven" },
];

/// Detector that replays a fixed script, counting every invocation.
struct ScriptedDetector {
    script: Vec<Option<Gesture>>,
    position: usize,
    ticks: Arc<AtomicUsize>,
}

impl ScriptedDetector {
    fn new(script: Vec<Option<Gesture>>) -> (Self, Arc<AtomicUsize>) {
        let ticks = Arc::new(AtomicUsize::new(0));
        (
            Self {
                script,
                position: 0,
                ticks: Arc::clone(&ticks),
            },
            ticks,
        )
    }
}

impl SignDetector for ScriptedDetector {
    fn detect(&mut self, _frame: &MediaFrame) -> Result<Option<Gesture>> {
        self.ticks.fetch_add(1, Ordering::SeqCst);
        let item = self.script[self.position % self.script.len()];
        self.position += 1;
        Ok(item)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Backend standing in for a device whose permission prompt was denied.
struct DeniedBackend;

#[async_trait::async_trait]
impl able_service::MediaBackend for DeniedBackend {
    async fn start(&mut self) -> Result<mpsc::Receiver<MediaFrame>, CaptureError> {
        Err(CaptureError::PermissionDenied(
            "user dismissed the prompt".to_string(),
        ))
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "denied"
    }
}

fn test_session(
    script: Vec<Option<Gesture>>,
    detect_interval_ms: u64,
    auto_detect: bool,
) -> (Arc<CaptureSession>, Arc<AtomicUsize>, Notifier) {
    let (detector, ticks) = ScriptedDetector::new(script);
    let backend = SyntheticBackend::new(MediaConstraints {
        width: 8,
        height: 8,
        frame_interval_ms: 10,
    });
    let notifier = Notifier::new();

    let config = SessionConfig {
        session_id: "test-session".to_string(),
        detect_interval: Duration::from_millis(detect_interval_ms),
        history_limit: 8,
        auto_detect,
    };

    let session = Arc::new(CaptureSession::new(
        config,
        Box::new(backend),
        Box::new(detector),
        notifier.clone(),
    ));

    (session, ticks, notifier)
}

async fn wait_for_detections(session: &CaptureSession, count: usize) {
    timeout(Duration::from_secs(120), async {
        while session.stats().await.detections < count {
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
    })
    .await
    .expect("detections never reached the expected count");
}

#[tokio::test(start_paused = true)]
async fn stop_is_idempotent() -> Result<()> {
    let (session, _, _) = test_session(vec![None], 100, false);
    assert_eq!(session.session_id(), "test-session");

    // Stopping a session that never started is a no-op.
    session.stop().await?;

    session.start().await?;
    assert!(session.stats().await.is_active);

    session.stop().await?;
    session.stop().await?;

    let stats = session.stats().await;
    assert!(!stats.is_active);
    assert!(!stats.detection_active);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn starting_twice_is_a_warned_noop() -> Result<()> {
    let (session, _, _) = test_session(vec![None], 100, false);

    session.start().await?;
    session.start().await?;
    assert!(session.stats().await.is_active);

    session.stop().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn history_is_capped_and_newest_first() -> Result<()> {
    let script: Vec<Option<Gesture>> = TEST_GESTURES.iter().copied().map(Some).collect();
    let (session, _, _) = test_session(script, 50, false);

    session.start().await?;
    session.start_detection().await?;

    wait_for_detections(&session, 12).await;

    let history = session.history().await;
    assert_eq!(history.len(), 8, "history must stay capped at 8");
    for pair in history.windows(2) {
        assert!(
            pair[0].timestamp >= pair[1].timestamp,
            "history must be ordered newest first"
        );
    }

    session.stop().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn consecutive_duplicates_collapse() -> Result<()> {
    let (session, _, _) = test_session(vec![Some(TEST_GESTURES[0])], 50, false);

    session.start().await?;
    session.start_detection().await?;

    wait_for_detections(&session, 5).await;

    let history = session.history().await;
    assert_eq!(history.len(), 1, "repeated gesture must not pile up");
    assert_eq!(history[0].symbol, "g0");

    session.stop().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn starting_detection_twice_keeps_one_timer() -> Result<()> {
    let (session, ticks, _) = test_session(vec![None], 100, false);

    session.start().await?;
    session.start_detection().await?;
    session.start_detection().await?;

    let before = ticks.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(1000)).await;
    let delta = ticks.load(Ordering::SeqCst) - before;

    // A leaked second timer would roughly double the tick count.
    assert!(
        (6..=12).contains(&delta),
        "expected about 10 ticks from a single timer, saw {}",
        delta
    );

    session.stop().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn concurrent_detection_starts_keep_one_timer() -> Result<()> {
    let (session, ticks, _) = test_session(vec![None], 100, false);

    session.start().await?;
    let (a, b) = tokio::join!(session.start_detection(), session.start_detection());
    a?;
    b?;

    let before = ticks.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(1000)).await;
    let delta = ticks.load(Ordering::SeqCst) - before;

    // A leaked second timer would roughly double the tick count.
    assert!(
        (6..=12).contains(&delta),
        "expected about 10 ticks from a single timer, saw {}",
        delta
    );

    session.stop().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn stop_prevents_further_ticks() -> Result<()> {
    let script: Vec<Option<Gesture>> = TEST_GESTURES.iter().copied().map(Some).collect();
    let (session, ticks, _) = test_session(script, 50, false);

    session.start().await?;
    session.start_detection().await?;
    wait_for_detections(&session, 2).await;

    session.stop().await?;
    let detections = session.stats().await.detections;
    let tick_count = ticks.load(Ordering::SeqCst);

    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(session.stats().await.detections, detections);
    assert_eq!(ticks.load(Ordering::SeqCst), tick_count);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn reset_clears_all_accumulated_state() -> Result<()> {
    let script: Vec<Option<Gesture>> = TEST_GESTURES.iter().copied().map(Some).collect();
    let (session, _, _) = test_session(script, 50, false);

    session.start().await?;
    session.start_detection().await?;
    wait_for_detections(&session, 3).await;

    session.reset().await?;

    let stats = session.stats().await;
    assert!(!stats.is_active);
    assert!(!stats.detection_active);
    assert_eq!(stats.detections, 0);
    assert!(session.history().await.is_empty());
    assert!(session.last_detected().await.is_none());

    // Reset on an already-reset session changes nothing.
    session.reset().await?;
    assert!(session.history().await.is_empty());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn detection_requires_an_active_session() {
    let (session, _, _) = test_session(vec![None], 100, false);

    let err = session.start_detection().await.unwrap_err();
    assert!(matches!(err, CaptureError::NotCapturing));
}

#[tokio::test(start_paused = true)]
async fn auto_detect_starts_the_loop_with_capture() -> Result<()> {
    let script: Vec<Option<Gesture>> = TEST_GESTURES.iter().copied().map(Some).collect();
    let (session, _, _) = test_session(script, 50, true);

    session.start().await?;
    assert!(session.stats().await.detection_active);

    wait_for_detections(&session, 1).await;
    assert!(session.last_detected().await.is_some());

    session.stop().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn observers_are_notified_of_detections() -> Result<()> {
    let script: Vec<Option<Gesture>> = TEST_GESTURES.iter().copied().map(Some).collect();
    let (session, _, _) = test_session(script, 50, false);
    let mut events = session.subscribe();

    session.start().await?;
    session.start_detection().await?;

    let event = timeout(Duration::from_secs(120), events.recv())
        .await
        .expect("no event before timeout")?;
    assert_eq!(event.symbol, "g0");
    assert_eq!(event.label, "zero");

    session.stop().await?;
    Ok(())
}

#[tokio::test]
async fn denied_device_surfaces_a_notice_and_stays_inactive() {
    let (detector, _) = ScriptedDetector::new(vec![None]);
    let notifier = Notifier::new();
    let mut notices = notifier.subscribe();

    let session = CaptureSession::new(
        SessionConfig::default(),
        Box::new(DeniedBackend),
        Box::new(detector),
        notifier.clone(),
    );

    assert!(session.start().await.is_err());

    let stats = session.stats().await;
    assert!(!stats.is_active);

    let notice = notices.recv().await.unwrap();
    assert_eq!(notice.severity, NoticeSeverity::Error);
    assert_eq!(notice.title, "Camera access error");
}
