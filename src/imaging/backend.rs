//! Image codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the rest of the crate
//! needs from a codec: decode a file, and encode an image at a given quality
//! while reporting how many bytes landed on disk.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the `MockBackend` below to script encoded sizes.

use super::params::EncodeParams;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("Failed to encode {path}: {reason}")]
    Encode { path: PathBuf, reason: String },
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Trait for image codec backends.
pub trait ImageBackend {
    /// Decode an image file into memory.
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Encode `image` to `output`, picking the format from the output
    /// extension. Returns the size of the written file in bytes.
    fn encode(
        &self,
        image: &DynamicImage,
        output: &Path,
        params: &EncodeParams,
    ) -> Result<u64, BackendError>;
}
