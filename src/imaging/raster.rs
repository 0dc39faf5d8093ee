//! The decoded in-memory raster every transform consumes and produces.
//!
//! Only two pixel layouts exist inside the pipeline: 8-bit gray and 8-bit
//! RGB. Whatever the decoder hands back is narrowed to one of these in
//! [`Image::from_dynamic`], so transforms never have to deal with alpha,
//! 16-bit samples, or float buffers.

use image::{DynamicImage, GrayImage, RgbImage};

/// A decoded image: either one luma channel or three color channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Image {
    Gray(GrayImage),
    Color(RgbImage),
}

impl Image {
    /// Narrow a decoded image to gray or RGB, dropping alpha.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        match img {
            DynamicImage::ImageLuma8(gray) => Image::Gray(gray),
            DynamicImage::ImageRgb8(rgb) => Image::Color(rgb),
            other if other.color().has_color() => Image::Color(other.to_rgb8()),
            other => Image::Gray(other.to_luma8()),
        }
    }

    pub fn into_dynamic(self) -> DynamicImage {
        match self {
            Image::Gray(gray) => DynamicImage::ImageLuma8(gray),
            Image::Color(rgb) => DynamicImage::ImageRgb8(rgb),
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Image::Gray(img) => img.width(),
            Image::Color(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Image::Gray(img) => img.height(),
            Image::Color(img) => img.height(),
        }
    }

    /// Samples per pixel: 1 for gray, 3 for color.
    pub fn channels(&self) -> u8 {
        match self {
            Image::Gray(_) => 1,
            Image::Color(_) => 3,
        }
    }

    /// Row-major sample buffer.
    pub fn as_raw(&self) -> &[u8] {
        match self {
            Image::Gray(img) => img.as_raw(),
            Image::Color(img) => img.as_raw(),
        }
    }

    /// Mutable view of the sample buffer; layout and size stay fixed.
    pub(crate) fn samples_mut(&mut self) -> &mut [u8] {
        match self {
            Image::Gray(img) => &mut **img,
            Image::Color(img) => &mut **img,
        }
    }
}

impl From<GrayImage> for Image {
    fn from(img: GrayImage) -> Self {
        Image::Gray(img)
    }
}

impl From<RgbImage> for Image {
    fn from(img: RgbImage) -> Self {
        Image::Color(img)
    }
}
