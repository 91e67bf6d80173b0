//! Speech I/O lifecycle
//!
//! Speech-to-text and text-to-speech are external engines modeled as
//! injectable traits; the session types here own their lifecycle
//! (start/stop idempotence, transcript accumulation, single utterance
//! at a time).

pub mod recognizer;
pub mod synthesizer;

pub use recognizer::{
    ListeningSession, RecognizerOptions, ScriptedTranscriber, SpeechError, Transcriber,
    TranscriptEvent, UnsupportedTranscriber,
};
pub use synthesizer::{LogSpeaker, Speaker};
