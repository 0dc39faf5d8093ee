//! The transform library: pure functions from one [`Image`] to another.
//!
//! No I/O and no shared state. Every function borrows its input and returns a
//! fresh image, so the batch driver can hand the same decoded image to any of
//! them without surprises. Validation failures come back as
//! [`TransformError::InvalidParameter`].
//!
//! | Function | Implementation |
//! |---|---|
//! | [`resize`] | `image::imageops::resize`, `FilterType::Triangle` (bilinear) |
//! | [`blur`] | separable Gaussian, reflect-101 borders |
//! | [`to_gray`] | BT.601 weights, see [`LUMA_WEIGHTS`](super::calculations::LUMA_WEIGHTS) |
//! | [`rotate`] | `imageproc::geometric_transformations::rotate_about_center` |
//! | [`flip`] | `image::imageops::flip_horizontal` / `flip_vertical` |
//! | [`adjust_brightness_contrast`] | per-sample `clamp(s * alpha + beta)` |
//! | [`edge_detect`] | `imageproc::edges::canny` on the luma plane |

use super::calculations::{
    MAX_KSIZE, gaussian_kernel, luma, normalize_ksize, reflect_101, scale_sample,
};
use super::params::FlipAxis;
use super::raster::Image;
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, Rgb};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub(crate) fn check_finite(name: &str, value: f32) -> Result<(), TransformError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TransformError::InvalidParameter(format!(
            "{name} must be a finite number, got {value}"
        )))
    }
}

/// Edge thresholds must be non-negative and ordered (`threshold1 <= threshold2`).
pub(crate) fn check_thresholds(threshold1: f32, threshold2: f32) -> Result<(), TransformError> {
    check_finite("threshold1", threshold1)?;
    check_finite("threshold2", threshold2)?;
    if threshold1 < 0.0 || threshold2 < 0.0 {
        return Err(TransformError::InvalidParameter(format!(
            "edge thresholds must be non-negative, got {threshold1} and {threshold2}"
        )));
    }
    if threshold1 > threshold2 {
        return Err(TransformError::InvalidParameter(format!(
            "threshold1 ({threshold1}) must not exceed threshold2 ({threshold2})"
        )));
    }
    Ok(())
}

pub(crate) fn check_ksize(ksize: u32) -> Result<(), TransformError> {
    if ksize <= 1 {
        return Err(TransformError::InvalidParameter(format!(
            "ksize must be greater than 1, got {ksize}"
        )));
    }
    if ksize > MAX_KSIZE {
        return Err(TransformError::InvalidParameter(format!(
            "ksize must be at most {MAX_KSIZE}, got {ksize}"
        )));
    }
    Ok(())
}

/// Scale to exactly `width` x `height`.
pub fn resize(image: &Image, width: u32, height: u32) -> Result<Image, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidParameter(format!(
            "width and height must be greater than 0, got {width}x{height}"
        )));
    }
    Ok(match image {
        Image::Gray(img) => Image::Gray(imageops::resize(img, width, height, FilterType::Triangle)),
        Image::Color(img) => {
            Image::Color(imageops::resize(img, width, height, FilterType::Triangle))
        }
    })
}

/// Gaussian blur with a `ksize` x `ksize` window.
///
/// Even sizes are bumped to the next odd size; `ksize <= 1` and sizes above
/// [`MAX_KSIZE`](super::calculations::MAX_KSIZE) are rejected.
pub fn blur(image: &Image, ksize: u32) -> Result<Image, TransformError> {
    check_ksize(ksize)?;
    let kernel = gaussian_kernel(normalize_ksize(ksize));

    let mut out = image.clone();
    separable_convolve(
        image.as_raw(),
        out.samples_mut(),
        image.width() as usize,
        image.height() as usize,
        image.channels() as usize,
        &kernel,
    );
    Ok(out)
}

/// Horizontal pass into an `f32` scratch buffer, then a vertical pass into `dst`.
///
/// Written out by hand instead of `imageproc::filter::separable_filter_equal`
/// because that one clamps at the border; this pass mirrors with reflect-101.
fn separable_convolve(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &[f32],
) {
    let radius = (kernel.len() / 2) as i64;
    let stride = width * channels;
    let mut scratch = vec![0f32; src.len()];

    for y in 0..height {
        let row = y * stride;
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0.0;
                for (k, w) in kernel.iter().enumerate() {
                    let sx = reflect_101(x as i64 + k as i64 - radius, width);
                    acc += w * src[row + sx * channels + c] as f32;
                }
                scratch[row + x * channels + c] = acc;
            }
        }
    }

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0.0;
                for (k, w) in kernel.iter().enumerate() {
                    let sy = reflect_101(y as i64 + k as i64 - radius, height);
                    acc += w * scratch[sy * stride + x * channels + c];
                }
                dst[y * stride + x * channels + c] = acc.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

fn luma_plane(image: &Image) -> GrayImage {
    match image {
        Image::Gray(img) => img.clone(),
        Image::Color(img) => GrayImage::from_fn(img.width(), img.height(), |x, y| {
            let Rgb([r, g, b]) = *img.get_pixel(x, y);
            Luma([luma(r, g, b)])
        }),
    }
}

/// Single-channel luma. Gray input comes back unchanged.
pub fn to_gray(image: &Image) -> Image {
    Image::Gray(luma_plane(image))
}

/// Rotate about the center by `angle` degrees, counter-clockwise.
///
/// Output keeps the input dimensions; corners uncovered by the rotated source
/// are filled with black. Whole turns return an exact copy.
pub fn rotate(image: &Image, angle: f32) -> Result<Image, TransformError> {
    check_finite("angle", angle)?;
    if angle % 360.0 == 0.0 {
        return Ok(image.clone());
    }
    // rotate_about_center turns clockwise for positive theta
    let theta = -angle.to_radians();
    Ok(match image {
        Image::Gray(img) => Image::Gray(rotate_about_center(
            img,
            theta,
            Interpolation::Bilinear,
            Luma([0]),
        )),
        Image::Color(img) => Image::Color(rotate_about_center(
            img,
            theta,
            Interpolation::Bilinear,
            Rgb([0, 0, 0]),
        )),
    })
}

/// Mirror along `axis`.
pub fn flip(image: &Image, axis: FlipAxis) -> Image {
    match (image, axis) {
        (Image::Gray(img), FlipAxis::Horizontal) => Image::Gray(imageops::flip_horizontal(img)),
        (Image::Gray(img), FlipAxis::Vertical) => Image::Gray(imageops::flip_vertical(img)),
        (Image::Color(img), FlipAxis::Horizontal) => Image::Color(imageops::flip_horizontal(img)),
        (Image::Color(img), FlipAxis::Vertical) => Image::Color(imageops::flip_vertical(img)),
    }
}

/// Per-sample `clamp(round(sample * alpha + beta), 0, 255)`.
pub fn adjust_brightness_contrast(
    image: &Image,
    alpha: f32,
    beta: f32,
) -> Result<Image, TransformError> {
    check_finite("alpha", alpha)?;
    check_finite("beta", beta)?;
    let mut out = image.clone();
    for sample in out.samples_mut() {
        *sample = scale_sample(*sample, alpha, beta);
    }
    Ok(out)
}

/// Canny edge map (0 or 255) with hysteresis between the two thresholds.
///
/// Always single-channel; color input is reduced with [`to_gray`] first.
pub fn edge_detect(image: &Image, threshold1: f32, threshold2: f32) -> Result<Image, TransformError> {
    check_thresholds(threshold1, threshold2)?;
    let gray = luma_plane(image);
    Ok(Image::Gray(imageproc::edges::canny(
        &gray, threshold1, threshold2,
    )))
}
