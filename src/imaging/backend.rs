//! Image codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between the batch driver and the
//! file formats: `decode` turns a file into an [`Image`], `encode` writes an
//! [`Image`] back out in the format named by the destination's extension.
//! The driver never looks at bytes itself.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests swap in a recording mock.

use super::raster::Image;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("Failed to encode {}: {reason}", path.display())]
    Encode { path: PathBuf, reason: String },
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Trait for image codec backends.
///
/// `Sync` so one backend can be shared across rayon workers.
pub trait ImageBackend: Sync {
    /// Read and decode an image file.
    fn decode(&self, path: &Path) -> Result<Image, BackendError>;

    /// Encode `image` to `path`, choosing the format from the extension.
    fn encode(&self, image: &Image, path: &Path) -> Result<(), BackendError>;
}
