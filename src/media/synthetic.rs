//! Synthetic media backend
//!
//! Generates grayscale frames on a fixed cadence without touching any
//! real device. Used by demos and tests, and as the default source on
//! builds without a platform capture bridge.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::backend::{CaptureError, MediaBackend, MediaConstraints, MediaFrame, MediaStreamSource};

pub struct SyntheticBackend {
    constraints: MediaConstraints,
    capturing: Arc<AtomicBool>,
    generator_task: Option<JoinHandle<()>>,
}

impl SyntheticBackend {
    pub fn new(constraints: MediaConstraints) -> Self {
        Self {
            constraints,
            capturing: Arc::new(AtomicBool::new(false)),
            generator_task: None,
        }
    }

    /// Deterministic frame content: a diagonal gradient shifted by the
    /// frame sequence number, so consecutive frames differ.
    fn render(constraints: &MediaConstraints, sequence: u64) -> Vec<u8> {
        let (w, h) = (constraints.width as u64, constraints.height as u64);
        let mut luma = Vec::with_capacity((w * h) as usize);
        for y in 0..h {
            for x in 0..w {
                luma.push(((x + y + sequence) % 256) as u8);
            }
        }
        luma
    }
}

#[async_trait::async_trait]
impl MediaBackend for SyntheticBackend {
    async fn start(&mut self) -> Result<mpsc::Receiver<MediaFrame>, CaptureError> {
        if self.capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::DeviceUnavailable(
                "synthetic stream already claimed".to_string(),
            ));
        }

        self.capturing.store(true, Ordering::SeqCst);

        let (tx, rx) = mpsc::channel(16);
        let capturing = Arc::clone(&self.capturing);
        let constraints = self.constraints.clone();

        self.generator_task = Some(tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval(std::time::Duration::from_millis(constraints.frame_interval_ms));
            let mut sequence: u64 = 0;

            loop {
                ticker.tick().await;

                if !capturing.load(Ordering::SeqCst) {
                    break;
                }

                let frame = MediaFrame {
                    luma: SyntheticBackend::render(&constraints, sequence),
                    width: constraints.width,
                    height: constraints.height,
                    timestamp_ms: sequence * constraints.frame_interval_ms,
                    source: MediaStreamSource::Synthetic,
                };

                if tx.send(frame).await.is_err() {
                    // Receiver dropped: stream no longer owned by anyone.
                    break;
                }

                sequence += 1;
            }

            debug!("Synthetic frame generator stopped");
        }));

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        self.capturing.store(false, Ordering::SeqCst);

        if let Some(task) = self.generator_task.take() {
            task.abort();
        }

        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn generates_frames_at_requested_cadence() {
        let mut backend = SyntheticBackend::new(MediaConstraints {
            width: 4,
            height: 2,
            frame_interval_ms: 100,
        });

        let mut rx = backend.start().await.unwrap();
        assert!(backend.is_capturing());

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();

        assert_eq!(first.luma.len(), 8);
        assert_eq!(first.timestamp_ms, 0);
        assert_eq!(second.timestamp_ms, 100);
        assert_ne!(first.luma, second.luma);

        backend.stop().await.unwrap();
        assert!(!backend.is_capturing());
    }

    #[tokio::test]
    async fn second_start_is_rejected_while_capturing() {
        let mut backend = SyntheticBackend::new(MediaConstraints::default());

        let _rx = backend.start().await.unwrap();
        let err = backend.start().await.unwrap_err();
        assert!(matches!(err, CaptureError::DeviceUnavailable(_)));

        backend.stop().await.unwrap();
    }
}
