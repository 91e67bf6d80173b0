use super::config::SessionConfig;
use super::detector::SignDetector;
use super::stats::{DetectionEvent, SessionStats};
use crate::media::{CaptureError, MediaBackend};
use crate::notify::Notifier;
use anyhow::{Context, Result};
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// A capture session binding an exclusive media stream to a recurring
/// gesture-detection loop.
///
/// Lifecycle invariant: a live detection timer implies the session is
/// active, and `stop` always clears both the stream and the timer.
pub struct CaptureSession {
    /// Session configuration
    config: SessionConfig,

    /// Sink for user-visible notifications
    notifier: Notifier,

    /// When the session was created
    started_at: chrono::DateTime<chrono::Utc>,

    /// Whether media capture is currently active
    is_active: Arc<AtomicBool>,

    /// Whether the detection loop is currently running
    detection_active: Arc<AtomicBool>,

    /// Frames received from the backend
    frames_seen: Arc<AtomicUsize>,

    /// Gestures detected so far
    detections: Arc<AtomicUsize>,

    /// The media backend owned by this session
    backend: Mutex<Box<dyn MediaBackend>>,

    /// Injected gesture detector
    detector: Arc<Mutex<Box<dyn SignDetector>>>,

    /// Most recent frame from the stream (the detection snapshot source)
    latest_frame: Arc<Mutex<Option<crate::media::MediaFrame>>>,

    /// Bounded detection history, newest first
    history: Arc<Mutex<VecDeque<DetectionEvent>>>,

    /// Last detected gesture
    last_detected: Arc<Mutex<Option<DetectionEvent>>>,

    /// Handle for the frame-forwarding task
    stream_task: Mutex<Option<JoinHandle<()>>>,

    /// Handle for the recurring detection task
    detect_task: Mutex<Option<JoinHandle<()>>>,

    /// Observer notification channel
    events_tx: broadcast::Sender<DetectionEvent>,
}

impl CaptureSession {
    /// Create a new capture session around an injected backend and
    /// detector. Nothing starts until [`start`](Self::start).
    pub fn new(
        config: SessionConfig,
        backend: Box<dyn MediaBackend>,
        detector: Box<dyn SignDetector>,
        notifier: Notifier,
    ) -> Self {
        info!("Creating capture session: {}", config.session_id);

        Self {
            config,
            notifier,
            started_at: Utc::now(),
            is_active: Arc::new(AtomicBool::new(false)),
            detection_active: Arc::new(AtomicBool::new(false)),
            frames_seen: Arc::new(AtomicUsize::new(0)),
            detections: Arc::new(AtomicUsize::new(0)),
            backend: Mutex::new(backend),
            detector: Arc::new(Mutex::new(detector)),
            latest_frame: Arc::new(Mutex::new(None)),
            history: Arc::new(Mutex::new(VecDeque::new())),
            last_detected: Arc::new(Mutex::new(None)),
            stream_task: Mutex::new(None),
            detect_task: Mutex::new(None),
            events_tx: broadcast::channel(32).0,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    /// Start media capture
    ///
    /// On backend denial or failure, a notification is surfaced once,
    /// the session stays inactive, and there is no automatic retry.
    pub async fn start(&self) -> Result<()> {
        if self.is_active.load(Ordering::SeqCst) {
            warn!("Capture already started");
            return Ok(());
        }

        info!("Starting capture session: {}", self.config.session_id);

        let mut frame_rx = {
            let mut backend = self.backend.lock().await;
            match backend.start().await {
                Ok(rx) => rx,
                Err(e) => {
                    self.notifier.error(
                        "Camera access error",
                        format!("Could not access the device: {}", e),
                    );
                    return Err(e).context("Failed to start media backend");
                }
            }
        };

        self.is_active.store(true, Ordering::SeqCst);

        // Forward frames into the latest-frame slot the detector
        // snapshots from.
        let is_active = Arc::clone(&self.is_active);
        let frames_seen = Arc::clone(&self.frames_seen);
        let latest_frame = Arc::clone(&self.latest_frame);

        let stream_task = tokio::spawn(async move {
            debug!("Frame forwarding task started");

            while let Some(frame) = frame_rx.recv().await {
                if !is_active.load(Ordering::SeqCst) {
                    break;
                }

                frames_seen.fetch_add(1, Ordering::SeqCst);
                *latest_frame.lock().await = Some(frame);
            }

            debug!("Frame forwarding task stopped");
        });

        {
            let mut handle = self.stream_task.lock().await;
            *handle = Some(stream_task);
        }

        if self.config.auto_detect {
            self.start_detection().await?;
        }

        info!("Capture session started successfully");

        Ok(())
    }

    /// Stop capture. Idempotent: a stopped session stays stopped.
    pub async fn stop(&self) -> Result<()> {
        if !self.is_active.load(Ordering::SeqCst) {
            debug!("Capture not active; stop is a no-op");
            return Ok(());
        }

        info!("Stopping capture session: {}", self.config.session_id);

        // Flip the flag first so an already-scheduled tick cannot take
        // effect while the backend winds down.
        self.is_active.store(false, Ordering::SeqCst);

        self.stop_detection().await;

        {
            let mut backend = self.backend.lock().await;
            if let Err(e) = backend.stop().await {
                warn!("Failed to stop media backend: {}", e);
            }
        }

        {
            let mut handle = self.stream_task.lock().await;
            if let Some(task) = handle.take() {
                task.abort();
            }
        }

        info!("Capture session stopped");

        Ok(())
    }

    /// Start the recurring detection loop
    ///
    /// At most one timer is live per session; calling this again first
    /// cancels any prior timer.
    pub async fn start_detection(&self) -> Result<(), CaptureError> {
        if !self.is_active.load(Ordering::SeqCst) {
            return Err(CaptureError::NotCapturing);
        }

        // Hold the handle slot across abort, spawn, and store so two
        // concurrent calls cannot leave two timers running.
        let mut handle = self.detect_task.lock().await;
        if let Some(task) = handle.take() {
            debug!("Replacing existing detection timer");
            task.abort();
            // Wait it out so a mid-flight tick cannot land after
            // the new timer starts.
            let _ = task.await;
        }

        self.detection_active.store(true, Ordering::SeqCst);

        let interval = self.config.detect_interval;
        let history_limit = self.config.history_limit;
        let is_active = Arc::clone(&self.is_active);
        let detection_active = Arc::clone(&self.detection_active);
        let detections = Arc::clone(&self.detections);
        let detector = Arc::clone(&self.detector);
        let latest_frame = Arc::clone(&self.latest_frame);
        let history = Arc::clone(&self.history);
        let last_detected = Arc::clone(&self.last_detected);
        let events_tx = self.events_tx.clone();

        let detect_task = tokio::spawn(async move {
            debug!("Detection loop started ({}ms interval)", interval.as_millis());

            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; detection waits one
            // full interval before its first look.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                if !detection_active.load(Ordering::SeqCst) || !is_active.load(Ordering::SeqCst) {
                    break;
                }

                let snapshot = { latest_frame.lock().await.clone() };
                let Some(frame) = snapshot else {
                    continue;
                };

                let outcome = { detector.lock().await.detect(&frame) };
                let gesture = match outcome {
                    Ok(Some(gesture)) => gesture,
                    Ok(None) => continue,
                    Err(e) => {
                        // Tick failures are non-fatal; the loop keeps
                        // going on the next tick.
                        warn!("Error processing frame: {}", e);
                        continue;
                    }
                };

                // Re-check before applying: a stop that raced this tick
                // must win.
                if !detection_active.load(Ordering::SeqCst) || !is_active.load(Ordering::SeqCst) {
                    break;
                }

                let event = DetectionEvent {
                    symbol: gesture.symbol.to_string(),
                    label: gesture.label.to_string(),
                    timestamp: Utc::now(),
                };

                {
                    let mut history = history.lock().await;
                    let repeat = history
                        .front()
                        .map(|last| last.symbol == event.symbol && last.label == event.label)
                        .unwrap_or(false);
                    if !repeat {
                        history.push_front(event.clone());
                        history.truncate(history_limit);
                    }
                }

                detections.fetch_add(1, Ordering::SeqCst);
                *last_detected.lock().await = Some(event.clone());

                debug!("Sign detected: {} ({})", event.symbol, event.label);
                let _ = events_tx.send(event);
            }

            debug!("Detection loop stopped");
        });

        *handle = Some(detect_task);

        Ok(())
    }

    /// Cancel the detection timer if present. Idempotent.
    pub async fn stop_detection(&self) {
        self.detection_active.store(false, Ordering::SeqCst);

        let mut handle = self.detect_task.lock().await;
        if let Some(task) = handle.take() {
            task.abort();
            debug!("Detection timer cancelled");
        }
    }

    /// Stop capture and clear all accumulated detection state.
    pub async fn reset(&self) -> Result<()> {
        self.stop().await?;

        self.history.lock().await.clear();
        *self.last_detected.lock().await = None;
        *self.latest_frame.lock().await = None;
        self.frames_seen.store(0, Ordering::SeqCst);
        self.detections.store(0, Ordering::SeqCst);

        info!("Capture session reset: {}", self.config.session_id);

        Ok(())
    }

    /// Get current session statistics
    pub async fn stats(&self) -> SessionStats {
        let duration = Utc::now().signed_duration_since(self.started_at);

        SessionStats {
            is_active: self.is_active.load(Ordering::SeqCst),
            detection_active: self.detection_active.load(Ordering::SeqCst),
            started_at: self.started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            frames_seen: self.frames_seen.load(Ordering::SeqCst),
            detections: self.detections.load(Ordering::SeqCst),
        }
    }

    /// Detection history, newest first, capped at the configured limit.
    pub async fn history(&self) -> Vec<DetectionEvent> {
        self.history.lock().await.iter().cloned().collect()
    }

    /// The most recently detected gesture, if any.
    pub async fn last_detected(&self) -> Option<DetectionEvent> {
        self.last_detected.lock().await.clone()
    }

    /// Subscribe to detection events as they happen.
    pub fn subscribe(&self) -> broadcast::Receiver<DetectionEvent> {
        self.events_tx.subscribe()
    }
}
