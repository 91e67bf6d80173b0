use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics about a capture session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Whether media capture is currently active
    pub is_active: bool,

    /// Whether the detection loop is currently running
    pub detection_active: bool,

    /// When the session was created
    pub started_at: DateTime<Utc>,

    /// Total session age in seconds
    pub duration_secs: f64,

    /// Number of frames received from the media backend
    pub frames_seen: usize,

    /// Number of gestures detected so far
    pub detections: usize,
}

/// One simulated recognition result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionEvent {
    /// Pictographic symbol for the gesture
    pub symbol: String,

    /// Human-readable meaning
    pub label: String,

    /// When the gesture was detected
    pub timestamp: DateTime<Utc>,
}
