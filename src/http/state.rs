use crate::assistant::{CannedAssistant, ChatAssistant, Conversation};
use crate::config::Config;
use crate::notify::Notifier;
use crate::session::CaptureSession;
use crate::signs::{Clipboard, MemoryClipboard, SignPlayer};
use crate::speech::{
    ListeningSession, LogSpeaker, RecognizerOptions, ScriptedTranscriber, Speaker,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<Config>,

    /// Active capture sessions (session_id → session)
    pub sessions: Arc<RwLock<HashMap<String, Arc<CaptureSession>>>>,

    /// Chat backend
    pub assistant: Arc<dyn ChatAssistant>,

    /// The single shared conversation
    pub conversation: Arc<Mutex<Conversation>>,

    /// Shared sign playback surface
    pub player: Arc<SignPlayer>,

    /// Clipboard collaborator
    pub clipboard: Arc<dyn Clipboard>,

    /// Speech-to-text lifecycle
    pub listening: Arc<ListeningSession>,

    /// Text-to-speech engine
    pub speaker: Arc<dyn Speaker>,

    /// User-visible notification fan-out
    pub notifier: Notifier,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let notifier = Notifier::new();

        let assistant = Arc::new(CannedAssistant::new(Duration::from_millis(
            config.assistant.reply_delay_ms,
        )));

        let player = Arc::new(SignPlayer::new(Duration::from_millis(
            config.playback.step_ms,
        )));

        // Headless builds ship the scripted demo engine; hosts with a
        // real recognizer swap it at this seam.
        let transcriber = ScriptedTranscriber::new(vec![(
            "Hello from the ABLE demo transcriber.".to_string(),
            false,
        )]);
        let listening = Arc::new(ListeningSession::new(
            Box::new(transcriber),
            RecognizerOptions::default(),
            notifier.clone(),
        ));

        Self {
            config: Arc::new(config),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            assistant,
            conversation: Arc::new(Mutex::new(Conversation::new())),
            player,
            clipboard: Arc::new(MemoryClipboard::new()),
            listening,
            speaker: Arc::new(LogSpeaker::new()),
            notifier,
        }
    }
}
