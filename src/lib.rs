//! # img-batch
//!
//! Apply one image transformation to every image in a folder.
//!
//! Point it at an input folder, pick a mode, and every JPEG, PNG, BMP or GIF
//! directly inside the folder is decoded, transformed and written to the
//! output folder under its original file name and format. A file that cannot
//! be read or written is reported and skipped; the rest of the batch carries
//! on.
//!
//! ```text
//! img-batch -i photos -o out -m resize --width 800 --height 600
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists candidate images in the input folder, prepares the output folder |
//! | [`process`] | The batch driver: resolve parameters, then decode → transform → encode per file |
//! | [`imaging`] | The image model, the transform library, and the codec backend |
//! | [`config`] | Optional TOML config file with run defaults |
//! | [`output`] | CLI output formatting, one pure function per message kind |
//!
//! # Design Decisions
//!
//! ## Two Error Tiers
//!
//! Problems with the run itself (a missing `--width`, an input folder that
//! does not exist, an output folder that cannot be created) stop everything
//! before a single file is touched and end with a non-zero exit status.
//! Problems with one file never escape that file: each candidate produces its
//! own `Result`, and the driver only counts them. A batch that ran to the end
//! always exits zero.
//!
//! ## Resolve Once, Apply Many
//!
//! Loose parameters ([`imaging::RunParams`]) are turned into a validated
//! [`imaging::Transform`] once per run. The per-file loop only dispatches on
//! that closed enum, so it cannot fail on a parameter.
//!
//! ## Format Follows The Source
//!
//! The output keeps the source's extension, and the encoder is chosen from
//! it. A run never converts between formats.

pub mod config;
pub mod imaging;
pub mod output;
pub mod process;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
