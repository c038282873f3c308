//! Output filename derivation.
//!
//! The compressed file keeps the input's name and extension, with the unix
//! timestamp of the run spliced in before the extension so repeated runs do
//! not overwrite each other:
//!
//! - `photo.jpg` → `photo_1700000000.jpg`
//! - `IMG_0042.JPEG` → `IMG_0042_1700000000.JPEG` (extension case kept)
//! - `my.holiday.png` → `my_holiday_1700000000.png`
//!
//! Names are split at the **last** `.`; any earlier dots in the stem become
//! `_`. A name without a usable extension (`README`, `photo.`, `.jpg`) is
//! rejected rather than guessed at. The name is parsed while resolving the
//! arguments, so a bad name fails before anything is encoded.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    #[error("File name '{0}' has no extension")]
    MissingExtension(String),
    #[error("File name '{0}' has no name before its extension")]
    MissingStem(String),
}

/// Result of splitting a file name like `my.holiday.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Everything before the last dot, inner dots replaced by `_`.
    pub stem: String,
    /// Everything after the last dot, unchanged.
    pub extension: String,
}

/// Split a file name at its last `.`.
pub fn parse_file_name(name: &str) -> Result<ParsedName, NamingError> {
    let (stem, extension) = name
        .rsplit_once('.')
        .filter(|(_, ext)| !ext.is_empty())
        .ok_or_else(|| NamingError::MissingExtension(name.to_string()))?;
    if stem.is_empty() {
        return Err(NamingError::MissingStem(name.to_string()));
    }
    Ok(ParsedName {
        stem: stem.replace('.', "_"),
        extension: extension.to_string(),
    })
}

impl ParsedName {
    /// Output file name at `timestamp` (unix seconds).
    pub fn timestamped(&self, timestamp: u64) -> String {
        format!("{}_{}.{}", self.stem, timestamp, self.extension)
    }
}
