use super::backend::{BackendError, ImageBackend};
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// A decoded input image together with the file it was read from.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub path: PathBuf,
    /// Final path component, e.g. `photo.jpg`.
    pub file_name: String,
    /// Size of the source file on disk.
    pub byte_size: u64,
    pub image: DynamicImage,
}

impl ImageAsset {
    /// Decode `path` through `backend` and record its on-disk size.
    pub fn load(backend: &impl ImageBackend, path: &Path) -> Result<Self, BackendError> {
        let image = backend.decode(path)?;
        let byte_size = std::fs::metadata(path)?.len();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            byte_size,
            image,
        })
    }

    /// Extension of the source file, without the dot. Empty if there is none.
    pub fn extension(&self) -> &str {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
    }
}
