pub mod backend;
pub mod synthetic;

pub use backend::{
    CaptureError, MediaBackend, MediaBackendFactory, MediaConstraints, MediaFrame,
    MediaStreamSource,
};
pub use synthetic::SyntheticBackend;
