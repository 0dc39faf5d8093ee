//! Run every transform once on a single image and save each result.
//!
//! ```text
//! cargo run --example transform_gallery -- --input sample.png --output-dir gallery
//! ```
//!
//! Writes `<stem>_<label><ext>` next to each other in the output folder, e.g.
//! `sample_resize_300x300.png`, `sample_gray.png`, `sample_edge_t100_200.png`.

use clap::Parser;
use img_batch::imaging::transforms::{
    adjust_brightness_contrast, blur, edge_detect, flip, resize, rotate, to_gray,
};
use img_batch::imaging::{FlipAxis, Image, ImageBackend, RustBackend};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Apply each img-batch transform to one image")]
struct Args {
    /// Image to transform
    #[arg(long)]
    input: PathBuf,

    /// Folder for the results (created if missing)
    #[arg(long)]
    output_dir: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let backend = RustBackend::new();

    let img = backend.decode(&args.input)?;
    println!("Input size: {}x{}", img.width(), img.height());
    std::fs::create_dir_all(&args.output_dir)?;

    let stem = args
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let ext = args
        .input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());

    let variants: Vec<(&str, Image)> = vec![
        ("resize_300x300", resize(&img, 300, 300)?),
        ("gray", to_gray(&img)),
        ("blur_ksize9", blur(&img, 9)?),
        ("rotate_90", rotate(&img, 90.0)?),
        ("flip_horizontal", flip(&img, FlipAxis::Horizontal)),
        ("flip_vertical", flip(&img, FlipAxis::Vertical)),
        ("bright_a1.2_b30", adjust_brightness_contrast(&img, 1.2, 30.0)?),
        ("edge_t100_200", edge_detect(&img, 100.0, 200.0)?),
    ];

    for (label, result) in &variants {
        let dest = args.output_dir.join(format!("{stem}_{label}.{ext}"));
        backend.encode(result, &dest)?;
        println!("Saved {}", dest.display());
    }

    println!("Done - {} variants", variants.len());
    Ok(())
}
