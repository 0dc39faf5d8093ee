//! Pure Rust codec backend on top of the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, BMP, GIF) | `image::ImageReader` with content sniffing |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` at the configured [`Quality`] |
//! | Encode → GIF | `image::codecs::gif` via RGBA (the GIF encoder has no luma path) |
//! | Encode → PNG, BMP | `DynamicImage::save_with_format` |
//!
//! The output format always follows the destination extension, which the
//! driver copies from the source, so a run never changes a file's container.

use super::backend::{BackendError, ImageBackend};
use super::params::Quality;
use super::raster::Image;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::Path;

/// Codec backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend {
    quality: Quality,
}

impl RustBackend {
    pub fn new() -> Self {
        Self::with_quality(Quality::default())
    }

    pub fn with_quality(quality: Quality) -> Self {
        Self { quality }
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::Decode {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

fn encode_error(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::Encode {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

/// Encode and save as JPEG at the given quality.
fn save_jpeg(img: &DynamicImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, quality.value());
    img.write_with_encoder(encoder)
        .map_err(|e| encode_error(path, e))
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<Image, BackendError> {
        let decoded = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| decode_error(path, e))?;
        Ok(Image::from_dynamic(decoded))
    }

    fn encode(&self, image: &Image, path: &Path) -> Result<(), BackendError> {
        let format = ImageFormat::from_path(path).map_err(|_| {
            let ext = path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default();
            BackendError::UnsupportedFormat(ext)
        })?;
        let img = image.clone().into_dynamic();

        match format {
            ImageFormat::Jpeg => save_jpeg(&img, path, self.quality),
            ImageFormat::Gif => DynamicImage::ImageRgba8(img.to_rgba8())
                .save_with_format(path, ImageFormat::Gif)
                .map_err(|e| encode_error(path, e)),
            ImageFormat::Png | ImageFormat::Bmp => img
                .save_with_format(path, format)
                .map_err(|e| encode_error(path, e)),
            other => Err(BackendError::UnsupportedFormat(format!("{other:?}"))),
        }
    }
}
