pub mod assistant;
pub mod config;
pub mod http;
pub mod media;
pub mod notify;
pub mod session;
pub mod signs;
pub mod speech;
pub mod subjects;

pub use assistant::{CannedAssistant, ChatAssistant, Conversation, Message};
pub use config::Config;
pub use http::{create_router, AppState};
pub use media::{
    CaptureError, MediaBackend, MediaBackendFactory, MediaConstraints, MediaFrame,
    MediaStreamSource, SyntheticBackend,
};
pub use notify::{Notice, NoticeSeverity, Notifier};
pub use session::{
    CaptureSession, DetectionEvent, Gesture, RandomDetector, SessionConfig, SessionStats,
    SignDetector, GESTURES,
};
pub use signs::{Clipboard, MemoryClipboard, PlaybackState, SignPlayer};
pub use speech::{
    ListeningSession, LogSpeaker, RecognizerOptions, ScriptedTranscriber, Speaker, Transcriber,
    TranscriptEvent,
};
