//! Image decoding, transformation and encoding.
//!
//! | Mode | Crate / function |
//! |---|---|
//! | **resize** | `image::imageops::resize` (triangle filter) |
//! | **gray** | BT.601 luma, per pixel |
//! | **blur** | separable Gaussian, reflect-101 border |
//! | **rotate** | `imageproc::geometric_transformations::rotate_about_center` |
//! | **flip** | `image::imageops::flip_horizontal` / `flip_vertical` |
//! | **brightness_contrast** | saturating `alpha * v + beta` per sample |
//! | **edge** | `imageproc::edges::canny` |
//!
//! The module is split into:
//! - **Raster**: [`Image`], the gray-or-RGB buffer every transform consumes
//! - **Calculations**: Pure per-sample and kernel math (unit testable)
//! - **Parameters**: [`RunParams`] as configured, [`Transform`] as resolved
//! - **Transforms**: One pure function per mode
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
mod raster;
pub mod rust_backend;
pub mod transforms;

pub use backend::{BackendError, ImageBackend};
pub use params::{FlipAxis, Mode, ParamError, Quality, RunParams, Transform};
pub use raster::Image;
pub use rust_backend::RustBackend;
pub use transforms::TransformError;
