//! Text-to-sign conversion and playback

pub mod alphabet;
pub mod clipboard;
pub mod player;

pub use alphabet::{glyph_for, transcribe};
pub use clipboard::{Clipboard, MemoryClipboard};
pub use player::{PlaybackState, SignPlayer};
