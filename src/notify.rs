//! Transient user-visible notifications.
//!
//! Every recoverable failure in the service (device denial, clipboard
//! failure, unsupported speech engine) is reported once through a
//! [`Notifier`] rather than being fatal. UI layers subscribe to the
//! broadcast stream; everything is mirrored to the tracing log.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// How prominent a notice should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeSeverity {
    Info,
    Error,
}

/// A single transient notification.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: NoticeSeverity,
    pub timestamp: DateTime<Utc>,
}

/// Fan-out handle for notices. Cheap to clone; shared across sessions
/// and HTTP handlers.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notice>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    /// Subscribe to the notice stream. Slow subscribers may lag and
    /// miss notices; that is acceptable for transient toasts.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn info(&self, title: impl Into<String>, description: impl Into<String>) {
        self.publish(title.into(), description.into(), NoticeSeverity::Info);
    }

    pub fn error(&self, title: impl Into<String>, description: impl Into<String>) {
        self.publish(title.into(), description.into(), NoticeSeverity::Error);
    }

    fn publish(&self, title: String, description: String, severity: NoticeSeverity) {
        match severity {
            NoticeSeverity::Info => info!("{}: {}", title, description),
            NoticeSeverity::Error => warn!("{}: {}", title, description),
        }

        // No subscribers is fine; notices are best-effort.
        let _ = self.tx.send(Notice {
            title,
            description,
            severity,
            timestamp: Utc::now(),
        });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
