use anyhow::{bail, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Text-to-speech seam. Only one utterance plays at a time: `speak`
/// cancels any utterance already in flight.
#[async_trait::async_trait]
pub trait Speaker: Send + Sync {
    /// Speak the given text. Empty text is rejected.
    async fn speak(&self, text: &str) -> Result<()>;

    /// Cancel any in-flight utterance. Idempotent.
    async fn cancel(&self) -> Result<()>;

    /// Whether an utterance is currently playing
    fn is_speaking(&self) -> bool;
}

/// Headless synthesizer: logs the utterance and holds the speaking flag
/// for a simulated duration proportional to the text length.
pub struct LogSpeaker {
    /// Simulated time per character
    per_char: Duration,
    speaking: Arc<AtomicBool>,
    utterance_task: Mutex<Option<JoinHandle<()>>>,
}

impl LogSpeaker {
    pub fn new() -> Self {
        Self {
            per_char: Duration::from_millis(40),
            speaking: Arc::new(AtomicBool::new(false)),
            utterance_task: Mutex::new(None),
        }
    }
}

impl Default for LogSpeaker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Speaker for LogSpeaker {
    async fn speak(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            bail!("no text to speak");
        }

        // Cancel any ongoing speech before starting a new utterance.
        self.cancel().await?;

        info!("Speaking: {}", text);
        self.speaking.store(true, Ordering::SeqCst);

        let duration = self.per_char * text.chars().count() as u32;
        let speaking = Arc::clone(&self.speaking);

        let task = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            speaking.store(false, Ordering::SeqCst);
            debug!("Utterance finished");
        });

        let mut handle = self.utterance_task.lock().await;
        *handle = Some(task);

        Ok(())
    }

    async fn cancel(&self) -> Result<()> {
        let mut handle = self.utterance_task.lock().await;
        if let Some(task) = handle.take() {
            task.abort();
        }
        self.speaking.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }
}
