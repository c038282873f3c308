//! Command-line arguments and their validation.
//!
//! [`CliArgs`] is the raw `clap` surface. [`Settings::resolve`] turns it into a
//! validated record: the input decoded, its file name split for the output
//! name, the output directory checked, and the size budget computed.

use crate::config::ToolConfig;
use crate::imaging::{BackendError, ImageAsset, ImageBackend};
use crate::naming::{NamingError, ParsedName, parse_file_name};
use crate::units::{SizeBudget, UnknownUnit, parse_optional_unit};
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArgumentError {
    #[error("Image path: {path} is not a valid image ({source})")]
    InvalidImage { path: PathBuf, source: BackendError },
    #[error("Image path: {path} cannot name an output file ({source})")]
    InvalidFileName { path: PathBuf, source: NamingError },
    #[error("Output path: {0} is not a valid directory")]
    InvalidOutputDir(PathBuf),
    #[error("Invalid size type: {0}")]
    InvalidSizeType(#[from] UnknownUnit),
}

#[derive(Parser, Debug, Clone)]
#[command(name = "shrinkpic")]
#[command(version)]
#[command(about = "Compress an image until it fits under a size budget")]
#[command(long_about = "\
Compress an image until it fits under a size budget

The image is re-encoded at quality 94, 89, 84, … until the result is no
larger than the budget. The original image is then encoded once at that
quality and written to the output directory as <name>_<unix time>.<ext>.

Examples:

  shrinkpic -i photo.jpg -o out/ -s 500 -t KB    # at most 500 KB (512000 bytes)
  shrinkpic -i photo.jpg -o out/ -s 200000       # at most 200000 bytes

Sizes are reported in the unit given by -t, or in the largest fitting unit.")]
pub struct CliArgs {
    /// Input path of the image
    #[arg(short = 'i', long = "input_image", value_name = "PATH")]
    pub input_image: PathBuf,

    /// Existing directory to write the compressed image into
    #[arg(short = 'o', long = "output_path", value_name = "DIR")]
    pub output_path: PathBuf,

    /// Maximum output size, counted in --size_type units (bytes if omitted)
    #[arg(
        short = 's',
        long = "output_size",
        value_name = "SIZE",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub output_size: u64,

    /// Size unit: B, KB, MB, GB, TB, PB, EB, ZB, YB (case-insensitive)
    #[arg(short = 't', long = "size_type", value_name = "UNIT")]
    pub size_type: Option<String>,

    /// TOML config file overriding search, encode and scratch settings
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log every trial encode to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Validated inputs for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub asset: ImageAsset,
    /// `asset.file_name` split into stem and extension.
    pub output_name: ParsedName,
    pub output_dir: PathBuf,
    pub budget: SizeBudget,
}

impl Settings {
    /// Validate `args`: the input must decode and have a `<stem>.<ext>` name,
    /// the output must be an existing directory, and the size type must be in
    /// the unit table (or empty).
    pub fn resolve(
        args: &CliArgs,
        backend: &impl ImageBackend,
        config: &ToolConfig,
    ) -> Result<Self, ArgumentError> {
        let asset = ImageAsset::load(backend, &args.input_image).map_err(|source| {
            ArgumentError::InvalidImage {
                path: args.input_image.clone(),
                source,
            }
        })?;
        let output_name =
            parse_file_name(&asset.file_name).map_err(|source| ArgumentError::InvalidFileName {
                path: args.input_image.clone(),
                source,
            })?;
        if !args.output_path.is_dir() {
            return Err(ArgumentError::InvalidOutputDir(args.output_path.clone()));
        }
        let unit = parse_optional_unit(args.size_type.as_deref())?;
        Ok(Self {
            asset,
            output_name,
            output_dir: args.output_path.clone(),
            budget: SizeBudget::new(args.output_size, unit, config.budget.scale_with_unit),
        })
    }
}
