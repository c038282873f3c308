//! The compression pipeline: search for a quality, then write the output.
//!
//! ```text
//! Settings ──► search_quality ──► write_output ──► CompressReport
//!              (scratch encodes)  (one final encode)
//! ```
//!
//! Input validation happens earlier in [`Settings::resolve`]; this module
//! assumes a decoded input with a usable file name and an existing output
//! directory. Nothing is
//! written to the output directory unless the search succeeds.

use crate::args::Settings;
use crate::config::ToolConfig;
use crate::imaging::{ImageBackend, Quality};
use crate::search::{CompressionAttempt, SearchError, SearchOptions, search_quality};
use crate::units::SizeBudget;
use crate::writer::{OutputArtifact, OutputError, OutputTarget, write_output};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("Failed to write output: {0}")]
    Output(#[from] OutputError),
}

/// Everything the CLI reports about a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressReport {
    pub input_bytes: u64,
    pub budget: SizeBudget,
    pub quality: Quality,
    pub attempts: Vec<CompressionAttempt>,
    pub output: OutputArtifact,
}

/// Run the quality search and the final write for `settings`.
pub fn compress(
    backend: &impl ImageBackend,
    settings: &Settings,
    config: &ToolConfig,
) -> Result<CompressReport, CompressError> {
    let options = SearchOptions::from_config(config);
    let outcome = search_quality(backend, &settings.asset, &settings.budget, &options)?;
    let target = OutputTarget {
        dir: &settings.output_dir,
        name: &settings.output_name,
        optimize: options.optimize,
    };
    let output = write_output(backend, &settings.asset, outcome.quality, &target)?;
    Ok(CompressReport {
        input_bytes: settings.asset.byte_size,
        budget: settings.budget,
        quality: outcome.quality,
        attempts: outcome.attempts,
        output,
    })
}
