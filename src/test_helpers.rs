//! Shared test utilities for the img-batch test suite.
//!
//! Synthetic rasters for the transform tests and on-disk fixture writers for
//! the codec, discovery and batch tests. Nothing here is checked in as a
//! binary fixture; every image is generated on the fly.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_input(&["a.jpg", "b.png"]);
//! write_corrupt(&tmp.path().join("broken.jpg"));
//! ```

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Synthetic rasters
// =========================================================================

/// Gray checkerboard of `cell`-sized squares alternating 0 and 255.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> GrayImage {
    let cell = cell.max(1);
    GrayImage::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

/// RGB image whose red ramps along x, green along y, blue constant.
pub fn gradient_rgb(width: u32, height: u32) -> RgbImage {
    let ramp = |v: u32, len: u32| (v * 255 / len.saturating_sub(1).max(1)) as u8;
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([ramp(x, width), ramp(y, height), 128])
    })
}

/// Gray image with a bright left half and a dark right half.
pub fn split_gray(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, _| {
        if x < width / 2 { Luma([255]) } else { Luma([0]) }
    })
}

// =========================================================================
// Fixture files
// =========================================================================

/// Write a gradient image to `path` in the format named by its extension.
pub fn create_test_image(path: &Path, width: u32, height: u32) {
    let format = ImageFormat::from_path(path)
        .unwrap_or_else(|_| panic!("no image format for {}", path.display()));
    let img = DynamicImage::ImageRgb8(gradient_rgb(width, height));
    let img = match format {
        ImageFormat::Gif => DynamicImage::ImageRgba8(img.to_rgba8()),
        _ => img,
    };
    img.save_with_format(path, format).unwrap();
}

/// Write bytes that carry an image extension but decode as nothing.
pub fn write_corrupt(path: &Path) {
    std::fs::write(path, b"not really an image").unwrap();
}

/// Temp input folder with one small gradient image per name.
pub fn setup_input(names: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for name in names {
        create_test_image(&tmp.path().join(name), 24, 16);
    }
    tmp
}

/// Sorted file names directly inside `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
