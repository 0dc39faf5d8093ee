//! Parameter types for image operations.
//!
//! These types describe *what* to do, not *how* to do it. [`RunParams`] is
//! the loose, user-facing bag of values (CLI flags layered over the config
//! file); [`Transform`] is the validated form the batch driver dispatches on.
//! Turning one into the other happens exactly once per run, in
//! [`Transform::resolve`], so a missing or out-of-range value stops the run
//! before any file is touched.
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 95). Clamped on construction.
//! - [`Mode`]: The closed set of transforms a run can select.
//! - [`FlipAxis`]: `horizontal` or `vertical`.
//! - [`RunParams`]: Mode plus every mode-specific value, with stock defaults.
//! - [`Transform`]: A mode with its parameters resolved and validated.

use super::raster::Image;
use super::transforms::{self, TransformError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Run-level parameter problems, reported before any file is processed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("mode '{mode}' requires --{param}")]
    Missing { mode: Mode, param: &'static str },
    #[error("invalid parameter: {0}")]
    Invalid(String),
}

impl From<TransformError> for ParamError {
    fn from(err: TransformError) -> Self {
        match err {
            TransformError::InvalidParameter(msg) => ParamError::Invalid(msg),
        }
    }
}

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

/// The transform applied to every image in a run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Re-encode each image unchanged
    #[default]
    Copy,
    /// Scale to exactly --width x --height
    Resize,
    /// Convert to single-channel grayscale
    Gray,
    /// Gaussian blur with a --ksize window
    Blur,
    /// Rotate counter-clockwise by --angle degrees
    Rotate,
    /// Mirror along --flip-axis
    Flip,
    /// Multiply by --alpha, then add --beta
    #[value(name = "brightness_contrast")]
    BrightnessContrast,
    /// Canny edge map with --threshold1/--threshold2
    Edge,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Copy => "copy",
            Mode::Resize => "resize",
            Mode::Gray => "gray",
            Mode::Blur => "blur",
            Mode::Rotate => "rotate",
            Mode::Flip => "flip",
            Mode::BrightnessContrast => "brightness_contrast",
            Mode::Edge => "edge",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mirror axis for [`transforms::flip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAxis {
    /// Left and right swap.
    Horizontal,
    /// Top and bottom swap.
    Vertical,
}

impl FromStr for FlipAxis {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(FlipAxis::Horizontal),
            "vertical" => Ok(FlipAxis::Vertical),
            other => Err(TransformError::InvalidParameter(format!(
                "flip axis must be 'horizontal' or 'vertical', got '{other}'"
            ))),
        }
    }
}

/// Mode and mode-specific values for one run.
///
/// Fields that have a sensible default carry it here; `width`, `height` and
/// `angle` have none and must be supplied when their mode needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunParams {
    pub mode: Mode,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub ksize: i64,
    pub angle: Option<f32>,
    pub flip_axis: String,
    pub alpha: f32,
    pub beta: f32,
    pub threshold1: f32,
    pub threshold2: f32,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            mode: Mode::Copy,
            width: None,
            height: None,
            ksize: 5,
            angle: None,
            flip_axis: "horizontal".to_string(),
            alpha: 1.0,
            beta: 0.0,
            threshold1: 100.0,
            threshold2: 200.0,
        }
    }
}

/// A mode with its parameters checked and converted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Copy,
    Resize { width: u32, height: u32 },
    Gray,
    /// `ksize` is kept as given; even sizes are normalized inside [`transforms::blur`].
    Blur { ksize: u32 },
    Rotate { angle: f32 },
    Flip { axis: FlipAxis },
    BrightnessContrast { alpha: f32, beta: f32 },
    Edge { threshold1: f32, threshold2: f32 },
}

impl Transform {
    /// Validate `params` against its mode.
    pub fn resolve(params: &RunParams) -> Result<Self, ParamError> {
        let mode = params.mode;
        let transform = match mode {
            Mode::Copy => Transform::Copy,
            Mode::Resize => {
                let width = params.width.ok_or(ParamError::Missing {
                    mode,
                    param: "width",
                })?;
                let height = params.height.ok_or(ParamError::Missing {
                    mode,
                    param: "height",
                })?;
                Transform::Resize {
                    width: positive_dimension("width", width)?,
                    height: positive_dimension("height", height)?,
                }
            }
            Mode::Gray => Transform::Gray,
            Mode::Blur => {
                let ksize = params.ksize;
                if ksize <= 1 {
                    return Err(ParamError::Invalid(format!(
                        "ksize must be greater than 1, got {ksize}"
                    )));
                }
                let ksize = u32::try_from(ksize)
                    .map_err(|_| ParamError::Invalid(format!("ksize {ksize} is too large")))?;
                transforms::check_ksize(ksize)?;
                Transform::Blur { ksize }
            }
            Mode::Rotate => {
                let angle = params.angle.ok_or(ParamError::Missing {
                    mode,
                    param: "angle",
                })?;
                transforms::check_finite("angle", angle)?;
                Transform::Rotate { angle }
            }
            Mode::Flip => Transform::Flip {
                axis: params.flip_axis.parse()?,
            },
            Mode::BrightnessContrast => {
                transforms::check_finite("alpha", params.alpha)?;
                transforms::check_finite("beta", params.beta)?;
                Transform::BrightnessContrast {
                    alpha: params.alpha,
                    beta: params.beta,
                }
            }
            Mode::Edge => {
                transforms::check_thresholds(params.threshold1, params.threshold2)?;
                Transform::Edge {
                    threshold1: params.threshold1,
                    threshold2: params.threshold2,
                }
            }
        };
        Ok(transform)
    }

    /// Run the selected transform on one decoded image.
    pub fn apply(&self, image: &Image) -> Result<Image, TransformError> {
        match *self {
            Transform::Copy => Ok(image.clone()),
            Transform::Resize { width, height } => transforms::resize(image, width, height),
            Transform::Gray => Ok(transforms::to_gray(image)),
            Transform::Blur { ksize } => transforms::blur(image, ksize),
            Transform::Rotate { angle } => transforms::rotate(image, angle),
            Transform::Flip { axis } => Ok(transforms::flip(image, axis)),
            Transform::BrightnessContrast { alpha, beta } => {
                transforms::adjust_brightness_contrast(image, alpha, beta)
            }
            Transform::Edge {
                threshold1,
                threshold2,
            } => transforms::edge_detect(image, threshold1, threshold2),
        }
    }
}

fn positive_dimension(name: &str, value: i64) -> Result<u32, ParamError> {
    if value <= 0 {
        return Err(ParamError::Invalid(format!(
            "{name} must be greater than 0, got {value}"
        )));
    }
    u32::try_from(value).map_err(|_| ParamError::Invalid(format!("{name} {value} is too large")))
}
