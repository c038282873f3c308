//! Quality search: find the highest quality on a fixed schedule whose
//! encoding fits the byte budget.
//!
//! ## Algorithm
//!
//! ```text
//! quality = start (99)
//! loop:
//!     quality -= step (5)            first attempt: 94
//!     if quality <= 0: fail          exhausted after 94, 89, …, 4
//!     encode current image → scratch
//!     if scratch size <= budget: accept quality
//!     current image = decode(scratch)
//! ```
//!
//! Each attempt re-encodes the previous attempt's output rather than the
//! pristine source, so losses accumulate across attempts. The accepted
//! quality is then applied to the original image by the
//! [`writer`](crate::writer).
//!
//! ## Scratch file
//!
//! Trial encodings go to a uniquely named file from `tempfile`, carrying the
//! input's extension so the backend picks the same format. The file is a
//! [`TempPath`](tempfile::TempPath) and is removed when it goes out of scope,
//! on success, exhaustion, and codec or I/O errors alike.

use crate::config::ToolConfig;
use crate::imaging::{BackendError, EncodeParams, ImageAsset, ImageBackend, Quality};
use crate::units::{DisplaySize, SizeBudget};
use image::DynamicImage;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("File cannot be compressed below {last_size} (budget {budget})")]
    Exhausted {
        last_size: DisplaySize,
        budget: SizeBudget,
    },
    #[error("Failed to create scratch file in {dir}: {source}")]
    Scratch {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("Image processing failed: {0}")]
    Backend(#[from] BackendError),
}

/// Fixed, strictly decreasing list of qualities to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualitySchedule {
    start: u32,
    step: u32,
}

impl QualitySchedule {
    /// `step` of zero is bumped to one so the schedule always terminates.
    pub fn new(start: u32, step: u32) -> Self {
        Self {
            start,
            step: step.max(1),
        }
    }

    /// Qualities in attempt order: `start - step`, `start - 2*step`, …,
    /// stopping before the first value ≤ 0.
    pub fn qualities(&self) -> impl Iterator<Item = Quality> + use<> {
        let step = self.step;
        let below = move |q: u32| q.checked_sub(step).filter(|next| *next > 0);
        std::iter::successors(below(self.start), move |q| below(*q)).map(Quality::new)
    }
}

impl Default for QualitySchedule {
    fn default() -> Self {
        Self::new(99, 5)
    }
}

/// One trial encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionAttempt {
    pub quality: Quality,
    pub bytes: u64,
}

/// Result of a successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Quality of the first attempt that fit the budget.
    pub quality: Quality,
    /// Every attempt made, in order. The last one is the accepted attempt.
    pub attempts: Vec<CompressionAttempt>,
}

/// Knobs for a search run.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub schedule: QualitySchedule,
    pub optimize: bool,
    pub scratch_dir: PathBuf,
}

impl SearchOptions {
    pub fn from_config(config: &ToolConfig) -> Self {
        Self {
            schedule: QualitySchedule::new(config.search.start_quality, config.search.step),
            optimize: config.encode.optimize,
            scratch_dir: config.scratch.resolve_dir(),
        }
    }
}

fn scratch_suffix(asset: &ImageAsset) -> String {
    match asset.extension() {
        "" => String::new(),
        ext => format!(".{ext}"),
    }
}

/// Lower the encoding quality of `asset` until it fits `budget`.
pub fn search_quality(
    backend: &impl ImageBackend,
    asset: &ImageAsset,
    budget: &SizeBudget,
    options: &SearchOptions,
) -> Result<SearchOutcome, SearchError> {
    let scratch = tempfile::Builder::new()
        .prefix(".shrinkpic-")
        .suffix(&scratch_suffix(asset))
        .tempfile_in(&options.scratch_dir)
        .map_err(|source| SearchError::Scratch {
            dir: options.scratch_dir.clone(),
            source,
        })?
        .into_temp_path();

    let mut reencoded: Option<DynamicImage> = None;
    let mut attempts = Vec::new();
    let mut last_size = budget.display(asset.byte_size);

    for quality in options.schedule.qualities() {
        let source = reencoded.as_ref().unwrap_or(&asset.image);
        let params = EncodeParams::new(quality, options.optimize);
        let bytes = backend.encode(source, &scratch, &params)?;
        last_size = budget.display(bytes);
        attempts.push(CompressionAttempt { quality, bytes });
        debug!(quality = quality.value(), bytes, size = %last_size, "trial encode");

        if bytes <= budget.bytes {
            info!(
                quality = quality.value(),
                attempts = attempts.len(),
                "quality accepted"
            );
            return Ok(SearchOutcome { quality, attempts });
        }
        reencoded = Some(backend.decode(&scratch)?);
    }

    warn!(attempts = attempts.len(), size = %last_size, budget = %budget, "quality search exhausted");
    Err(SearchError::Exhausted {
        last_size,
        budget: *budget,
    })
}
