use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a capture session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "capture-2026-08-23-demo")
    pub session_id: String,

    /// Interval between detection ticks
    /// Default: 2 seconds
    pub detect_interval: Duration,

    /// Maximum number of detection events retained, newest first
    pub history_limit: usize,

    /// When set, starting capture also starts the detection loop.
    /// When unset, detection is an explicit second step.
    pub auto_detect: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("capture-{}", uuid::Uuid::new_v4()),
            detect_interval: Duration::from_secs(2),
            history_limit: 8,
            auto_detect: false,
        }
    }
}
