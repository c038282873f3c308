//! Tool configuration.
//!
//! Everything here has a default, so the config file is optional. Pass one
//! with `--config path/to/shrinkpic.toml` to override individual values:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [search]
//! start_quality = 99   # the first attempt is start_quality - step
//! step = 5             # quality drop between attempts
//!
//! [encode]
//! optimize = true      # spend more encoder effort for smaller files
//!
//! [budget]
//! scale_with_unit = true   # `-s 500 -t KB` means 500 KiB, not 500 bytes
//!
//! [scratch]
//! # dir = "/var/tmp"   # where trial encodings go (default: system temp dir)
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Quality search schedule.
    pub search: SearchConfig,
    /// Encoder settings shared by trial and final encodes.
    pub encode: EncodeConfig,
    /// How `-s`/`-t` turn into a byte budget.
    pub budget: BudgetConfig,
    /// Scratch file placement.
    pub scratch: ScratchConfig,
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=99).contains(&self.search.start_quality) {
            return Err(ConfigError::Validation(
                "search.start_quality must be 1-99".into(),
            ));
        }
        if self.search.step == 0 {
            return Err(ConfigError::Validation(
                "search.step must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Quality search schedule: qualities tried are
/// `start_quality - step`, `start_quality - 2*step`, … while above zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub start_quality: u32,
    pub step: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            start_quality: 99,
            step: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodeConfig {
    pub optimize: bool,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self { optimize: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BudgetConfig {
    /// When false, `-t` only changes how sizes are printed and `-s` is
    /// always a raw byte count.
    pub scale_with_unit: bool,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            scale_with_unit: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScratchConfig {
    /// Directory for trial encodings. `None` uses the system temp dir.
    pub dir: Option<PathBuf>,
}

impl ScratchConfig {
    pub fn resolve_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// Parse and validate a TOML config string.
pub fn parse_config(content: &str) -> Result<ToolConfig, ConfigError> {
    let config: ToolConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from an optional file path.
///
/// `None` gives the stock defaults. A path that does not exist is an error:
/// it was asked for explicitly.
pub fn load_config(path: Option<&Path>) -> Result<ToolConfig, ConfigError> {
    match path {
        Some(path) => parse_config(&fs::read_to_string(path)?),
        None => Ok(ToolConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_documented_values() {
        let config = ToolConfig::default();
        assert_eq!(config.search.start_quality, 99);
        assert_eq!(config.search.step, 5);
        assert!(config.encode.optimize);
        assert!(config.budget.scale_with_unit);
        assert_eq!(config.scratch.dir, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config(
            r#"
[search]
step = 10
"#,
        )
        .unwrap();
        assert_eq!(config.search.step, 10);
        // Defaults preserved
        assert_eq!(config.search.start_quality, 99);
        assert!(config.encode.optimize);
    }

    #[test]
    fn parse_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), ToolConfig::default());
    }

    #[test]
    fn load_config_without_path_is_default() {
        assert_eq!(load_config(None).unwrap(), ToolConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shrinkpic.toml");
        fs::write(
            &path,
            r#"
[budget]
scale_with_unit = false

[scratch]
dir = "/var/tmp"
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!(!config.budget.scale_with_unit);
        assert_eq!(config.scratch.resolve_dir(), PathBuf::from("/var/tmp"));
    }

    #[test]
    fn load_config_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(Some(&tmp.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shrinkpic.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn unknown_key_rejected() {
        let result = parse_config(
            r#"
[search]
stpe = 5
"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        assert!(parse_config("[serch]\nstep = 5\n").is_err());
    }

    #[test]
    fn start_quality_out_of_range_rejected() {
        for bad in ["0", "100"] {
            let result = parse_config(&format!("[search]\nstart_quality = {bad}\n"));
            assert!(matches!(result, Err(ConfigError::Validation(_))), "{bad}");
        }
    }

    #[test]
    fn zero_step_rejected() {
        let result = parse_config("[search]\nstep = 0\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn default_scratch_dir_is_system_temp() {
        assert_eq!(
            ScratchConfig::default().resolve_dir(),
            std::env::temp_dir()
        );
    }
}
