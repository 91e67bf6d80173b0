//! Capture session management
//!
//! This module provides the `CaptureSession` abstraction that manages:
//! - Exclusive ownership of a media stream from a backend
//! - A recurring, cancellable gesture-detection loop
//! - Bounded detection history and last-detected state
//! - Session statistics and lifecycle (start/stop/reset)

mod config;
mod detector;
mod session;
mod stats;

pub use config::SessionConfig;
pub use detector::{Gesture, RandomDetector, SignDetector, GESTURES};
pub use session::CaptureSession;
pub use stats::{DetectionEvent, SessionStats};
