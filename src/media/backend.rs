use thiserror::Error;
use tokio::sync::mpsc;

/// Media stream source type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaStreamSource {
    /// Front-facing camera
    Camera,
    /// Microphone input
    Microphone,
    /// Synthetic frame generator (demos, tests)
    Synthetic,
}

/// One captured media snapshot (grayscale, row-major)
#[derive(Debug, Clone)]
pub struct MediaFrame {
    /// Raw luma bytes, `width * height` long
    pub luma: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Timestamp in milliseconds since capture started
    pub timestamp_ms: u64,
    /// Which device produced the frame
    pub source: MediaStreamSource,
}

/// Constraints requested from a media backend
#[derive(Debug, Clone)]
pub struct MediaConstraints {
    /// Requested frame width in pixels
    pub width: u32,
    /// Requested frame height in pixels
    pub height: u32,
    /// Interval between frames in milliseconds (affects latency)
    pub frame_interval_ms: u64,
}

impl Default for MediaConstraints {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            frame_interval_ms: 100,
        }
    }
}

/// Errors surfaced by media capture and session control
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("media permission denied: {0}")]
    PermissionDenied(String),

    #[error("media device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("{0} capture is not supported on this build")]
    Unsupported(&'static str),

    #[error("media capture is not active")]
    NotCapturing,
}

/// Media capture backend trait
///
/// Implementations wrap a concrete device or generator:
/// - Camera/Microphone: platform capture layer (not bundled here)
/// - Synthetic: deterministic frame generator for demos and tests
#[async_trait::async_trait]
pub trait MediaBackend: Send + Sync {
    /// Start capturing media
    ///
    /// Returns a channel receiver that will receive frames. The stream
    /// is exclusively owned by the caller until `stop`.
    async fn start(&mut self) -> Result<mpsc::Receiver<MediaFrame>, CaptureError>;

    /// Stop capturing and release the underlying device tracks
    async fn stop(&mut self) -> Result<(), CaptureError>;

    /// Check if backend is currently capturing
    fn is_capturing(&self) -> bool;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

impl std::fmt::Debug for dyn MediaBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaBackend")
            .field("name", &self.name())
            .finish()
    }
}

/// Media backend factory
pub struct MediaBackendFactory;

impl MediaBackendFactory {
    /// Create a media backend for the given source
    pub fn create(
        source: MediaStreamSource,
        constraints: MediaConstraints,
    ) -> Result<Box<dyn MediaBackend>, CaptureError> {
        match source {
            MediaStreamSource::Synthetic => {
                let backend = super::synthetic::SyntheticBackend::new(constraints);
                Ok(Box::new(backend))
            }

            // Real device capture needs a platform bridge that this
            // build does not carry; callers fall back to Synthetic.
            MediaStreamSource::Camera => Err(CaptureError::Unsupported("camera")),
            MediaStreamSource::Microphone => Err(CaptureError::Unsupported("microphone")),
        }
    }
}
