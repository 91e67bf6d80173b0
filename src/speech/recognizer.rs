use crate::notify::Notifier;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// One recognition result from the speech engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEvent {
    /// Recognized text
    pub text: String,

    /// Whether this is a partial (interim) result
    pub interim: bool,

    /// When the result was produced
    pub timestamp: DateTime<Utc>,
}

/// Options passed to the speech engine on start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizerOptions {
    /// BCP-47 language tag
    pub language: String,

    /// Keep listening after a final result
    pub continuous: bool,

    /// Emit interim results as they form
    pub interim_results: bool,
}

impl Default for RecognizerOptions {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            continuous: true,
            interim_results: true,
        }
    }
}

/// Errors surfaced by speech engines
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech recognition is not supported by this engine")]
    Unsupported,

    #[error("speech engine error: {0}")]
    Engine(String),
}

/// Speech-to-text engine seam
///
/// The service never talks to a real recognizer directly; hosts inject
/// one. [`ScriptedTranscriber`] ships for demos and tests.
#[async_trait::async_trait]
pub trait Transcriber: Send + Sync {
    /// Start recognizing speech
    ///
    /// Returns a channel receiver that will receive transcript events.
    async fn start(
        &mut self,
        options: RecognizerOptions,
    ) -> Result<mpsc::Receiver<TranscriptEvent>, SpeechError>;

    /// Stop recognizing
    async fn stop(&mut self) -> Result<(), SpeechError>;

    /// Engine name for logging
    fn name(&self) -> &str;
}

/// A listening session accumulating final transcript text from an
/// injected engine. Start/stop are idempotent; an unsupported or
/// failing engine surfaces one notification and leaves the session
/// idle.
pub struct ListeningSession {
    options: RecognizerOptions,
    notifier: Notifier,
    transcriber: Mutex<Box<dyn Transcriber>>,
    listening: Arc<AtomicBool>,
    transcript: Arc<Mutex<String>>,
    listen_task: Mutex<Option<JoinHandle<()>>>,
}

impl ListeningSession {
    pub fn new(
        transcriber: Box<dyn Transcriber>,
        options: RecognizerOptions,
        notifier: Notifier,
    ) -> Self {
        Self {
            options,
            notifier,
            transcriber: Mutex::new(transcriber),
            listening: Arc::new(AtomicBool::new(false)),
            transcript: Arc::new(Mutex::new(String::new())),
            listen_task: Mutex::new(None),
        }
    }

    pub async fn start(&self) -> Result<()> {
        if self.listening.load(Ordering::SeqCst) {
            warn!("Already listening");
            return Ok(());
        }

        let mut event_rx = {
            let mut transcriber = self.transcriber.lock().await;
            match transcriber.start(self.options.clone()).await {
                Ok(rx) => rx,
                Err(e) => {
                    self.notifier
                        .error("Speech Recognition Not Supported", e.to_string());
                    return Err(e.into());
                }
            }
        };

        self.listening.store(true, Ordering::SeqCst);
        self.notifier.info("Listening...", "Start speaking now");

        let listening = Arc::clone(&self.listening);
        let transcript = Arc::clone(&self.transcript);

        let listen_task = tokio::spawn(async move {
            debug!("Transcript task started");

            while let Some(event) = event_rx.recv().await {
                if !listening.load(Ordering::SeqCst) {
                    break;
                }

                if event.interim {
                    continue;
                }

                let mut transcript = transcript.lock().await;
                if !transcript.is_empty() {
                    transcript.push(' ');
                }
                transcript.push_str(&event.text);
            }

            // Engine closed the stream: mirror the recognizer's onend.
            listening.store(false, Ordering::SeqCst);
            debug!("Transcript task stopped");
        });

        {
            let mut handle = self.listen_task.lock().await;
            *handle = Some(listen_task);
        }

        Ok(())
    }

    /// Stop listening. Idempotent.
    pub async fn stop(&self) -> Result<()> {
        if !self.listening.load(Ordering::SeqCst) {
            debug!("Not listening; stop is a no-op");
            return Ok(());
        }

        self.listening.store(false, Ordering::SeqCst);

        {
            let mut transcriber = self.transcriber.lock().await;
            if let Err(e) = transcriber.stop().await {
                warn!("Failed to stop speech engine: {}", e);
            }
        }

        {
            let mut handle = self.listen_task.lock().await;
            if let Some(task) = handle.take() {
                task.abort();
            }
        }

        info!("Stopped listening");

        Ok(())
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    /// Accumulated final transcript text.
    pub async fn transcript(&self) -> String {
        self.transcript.lock().await.clone()
    }

    /// Clear the accumulated transcript.
    pub async fn clear(&self) {
        self.transcript.lock().await.clear();
    }
}

/// Scripted engine for demos and tests: replays a fixed list of
/// transcript events with a small delay between them.
pub struct ScriptedTranscriber {
    script: Vec<(String, bool)>,
    running: Arc<AtomicBool>,
}

impl ScriptedTranscriber {
    /// `script` entries are `(text, interim)` pairs.
    pub fn new(script: Vec<(String, bool)>) -> Self {
        Self {
            script,
            running: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[async_trait::async_trait]
impl Transcriber for ScriptedTranscriber {
    async fn start(
        &mut self,
        _options: RecognizerOptions,
    ) -> Result<mpsc::Receiver<TranscriptEvent>, SpeechError> {
        let (tx, rx) = mpsc::channel(16);
        let script = self.script.clone();
        let running = Arc::clone(&self.running);
        running.store(true, Ordering::SeqCst);

        tokio::spawn(async move {
            for (text, interim) in script {
                if !running.load(Ordering::SeqCst) {
                    break;
                }

                tokio::time::sleep(std::time::Duration::from_millis(10)).await;

                let event = TranscriptEvent {
                    text,
                    interim,
                    timestamp: Utc::now(),
                };
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        });

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<(), SpeechError> {
        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Engine standing in for a host without speech support; every start
/// fails with [`SpeechError::Unsupported`].
pub struct UnsupportedTranscriber;

#[async_trait::async_trait]
impl Transcriber for UnsupportedTranscriber {
    async fn start(
        &mut self,
        _options: RecognizerOptions,
    ) -> Result<mpsc::Receiver<TranscriptEvent>, SpeechError> {
        Err(SpeechError::Unsupported)
    }

    async fn stop(&mut self) -> Result<(), SpeechError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "unsupported"
    }
}
