//! Run configuration file.
//!
//! A config file supplies defaults for a batch run. Every key is optional,
//! unknown keys are rejected, and command-line flags always win over values
//! read here.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [params]
//! mode = "copy"             # copy | resize | gray | blur | rotate | flip | brightness_contrast | edge
//! # width = 800             # resize: required, > 0
//! # height = 600            # resize: required, > 0
//! ksize = 5                 # blur: kernel size, > 1, even values round up
//! # angle = 90.0            # rotate: required, degrees counter-clockwise
//! flip_axis = "horizontal"  # flip: horizontal | vertical
//! alpha = 1.0               # brightness_contrast: contrast gain
//! beta = 0.0                # brightness_contrast: brightness offset
//! threshold1 = 100.0        # edge: lower hysteresis threshold
//! threshold2 = 200.0        # edge: upper hysteresis threshold
//!
//! [output]
//! jpeg_quality = 95         # 1-100
//!
//! [processing]
//! # max_processes = 4       # parallel workers; absent = sequential
//! ```
//!
//! Run `img-batch --gen-config` for a commented copy of the above.

use crate::imaging::{Quality, RunParams};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
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

/// Batch configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Mode and transform parameters.
    pub params: RunParams,
    /// Encoder settings.
    pub output: OutputConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl BatchConfig {
    /// Validate config values are within acceptable ranges.
    ///
    /// Mode-specific parameters are checked later, when the run resolves
    /// its transform.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(ConfigError::Validation(
                "output.jpeg_quality must be 1-100".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Encoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG quality (1-100). Other formats are lossless and ignore it.
    pub jpeg_quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: u32::from(Quality::default().value()),
        }
    }
}

impl OutputConfig {
    pub fn quality(&self) -> Quality {
        Quality::new(self.jpeg_quality)
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers.
    /// When absent, files are processed one at a time.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective worker count from config.
///
/// - `None` → 1 (sequential)
/// - `Some(n)` → `min(n, cores)`, never below 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(1)
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<BatchConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: BatchConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by `--gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# img-batch configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Command-line flags override anything set here.
# Unknown keys will cause an error.

[params]
# Transform applied to every image:
#   copy | resize | gray | blur | rotate | flip | brightness_contrast | edge
mode = "copy"

# resize: target size in pixels. Both are required for resize, no default.
# width = 800
# height = 600

# blur: Gaussian kernel size. Must be greater than 1; even sizes round up.
ksize = 5

# rotate: degrees, positive turns counter-clockwise. Required for rotate.
# angle = 90.0

# flip: "horizontal" (mirror left/right) or "vertical" (mirror top/bottom).
flip_axis = "horizontal"

# brightness_contrast: every sample becomes alpha * value + beta, clamped.
alpha = 1.0
beta = 0.0

# edge: Canny hysteresis thresholds. threshold1 must not exceed threshold2.
threshold1 = 100.0
threshold2 = 200.0

# ---------------------------------------------------------------------------
# Output encoding
# ---------------------------------------------------------------------------
[output]
# JPEG quality, 1-100. PNG, BMP and GIF are written losslessly.
jpeg_quality = 95

# ---------------------------------------------------------------------------
# Parallel processing
# ---------------------------------------------------------------------------
[processing]
# Number of files processed at once. Absent means one at a time.
# Values above the number of CPU cores are clamped down.
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Mode;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("batch.toml");
        fs::write(&path, content).unwrap();
        (tmp, path)
    }

    #[test]
    fn default_config_values() {
        let config = BatchConfig::default();
        assert_eq!(config.params, RunParams::default());
        assert_eq!(config.output.jpeg_quality, 95);
        assert_eq!(config.processing.max_processes, None);
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: BatchConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, BatchConfig::default());
        config.validate().unwrap();
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let (_tmp, path) = write_config(
            r#"
[params]
mode = "blur"
ksize = 9
"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.params.mode, Mode::Blur);
        assert_eq!(config.params.ksize, 9);
        assert_eq!(config.params.flip_axis, "horizontal");
        assert_eq!(config.output.jpeg_quality, 95);
    }

    #[test]
    fn parse_all_sections() {
        let (_tmp, path) = write_config(
            r#"
[params]
mode = "resize"
width = 640
height = 480

[output]
jpeg_quality = 80

[processing]
max_processes = 4
"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.params.mode, Mode::Resize);
        assert_eq!(config.params.width, Some(640));
        assert_eq!(config.params.height, Some(480));
        assert_eq!(config.output.quality().value(), 80);
        assert_eq!(config.processing.max_processes, Some(4));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let (_tmp, path) = write_config("[params]\nradius = 3\n");
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_section_is_rejected() {
        let (_tmp, path) = write_config("[theme]\ncolor = \"red\"\n");
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let (_tmp, path) = write_config("[params]\nmode = \"sepia\"\n");
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn invalid_toml_is_error() {
        let (_tmp, path) = write_config("this is not valid toml [[[");
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(&tmp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    // =========================================================================
    // validate
    // =========================================================================

    #[test]
    fn validate_quality_bounds() {
        let mut config = BatchConfig::default();
        config.output.jpeg_quality = 100;
        assert!(config.validate().is_ok());
        config.output.jpeg_quality = 1;
        assert!(config.validate().is_ok());

        config.output.jpeg_quality = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        config.output.jpeg_quality = 101;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_zero_workers() {
        let mut config = BatchConfig::default();
        config.processing.max_processes = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_config_runs_validation() {
        let (_tmp, path) = write_config("[output]\njpeg_quality = 250\n");
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // effective_threads
    // =========================================================================

    #[test]
    fn effective_threads_defaults_to_sequential() {
        let config = ProcessingConfig {
            max_processes: None,
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let config = ProcessingConfig {
            max_processes: Some(99999),
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_never_zero() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }
}
