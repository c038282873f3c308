//! Final encode of the original image into the output directory.

use crate::imaging::{BackendError, EncodeParams, ImageAsset, ImageBackend, Quality};
use crate::naming::ParsedName;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("System clock is before the unix epoch")]
    Clock,
    #[error("Image processing failed: {0}")]
    Backend(#[from] BackendError),
}

/// Written output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub path: PathBuf,
    pub bytes: u64,
}

fn unix_now() -> Result<u64, OutputError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| OutputError::Clock)
}

/// Where and how the final file is written.
#[derive(Debug, Clone, Copy)]
pub struct OutputTarget<'a> {
    pub dir: &'a Path,
    /// The input's parsed file name.
    pub name: &'a ParsedName,
    pub optimize: bool,
}

/// Encode `asset`'s original image at `quality` into the target directory,
/// named after the source file plus the current unix timestamp.
pub fn write_output(
    backend: &impl ImageBackend,
    asset: &ImageAsset,
    quality: Quality,
    target: &OutputTarget<'_>,
) -> Result<OutputArtifact, OutputError> {
    write_output_at(backend, asset, quality, target, unix_now()?)
}

/// [`write_output`] with an explicit timestamp.
pub fn write_output_at(
    backend: &impl ImageBackend,
    asset: &ImageAsset,
    quality: Quality,
    target: &OutputTarget<'_>,
    timestamp: u64,
) -> Result<OutputArtifact, OutputError> {
    let path = target.dir.join(target.name.timestamped(timestamp));
    let params = EncodeParams::new(quality, target.optimize);
    let bytes = backend.encode(&asset.image, &path, &params)?;
    info!(path = %path.display(), bytes, quality = quality.value(), "output written");
    Ok(OutputArtifact { path, bytes })
}
