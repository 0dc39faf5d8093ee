//! CLI output formatting.
//!
//! Every user-facing line is built by a pure `format_*` function returning
//! `Vec<String>` (or `String`), so the exact wording is unit tested without
//! capturing stdout. The `print_*` wrappers are the only place that writes.
//!
//! # Output Format
//!
//! ```text
//! Found images: 4
//! Output folder: out
//! OK a.jpg -> out/a.jpg
//! Unreadable image, skipped: broken.jpg (Failed to decode ...)
//! OK b.png -> out/b.png
//! OK c.bmp -> out/c.bmp
//! Done - found: 4, succeeded: 3, failed: 1 -> out
//! ```
//!
//! An input folder without candidates prints a single line instead:
//!
//! ```text
//! No image files found in: photos
//! ```
//!
//! Run-level errors go to stderr as `error: <message>`.

use crate::process::{BatchOutcome, ProcessEvent};
use std::path::Path;

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format a single progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::Started { found, output_dir } => vec![
            format!("Found images: {found}"),
            format!("Output folder: {}", output_dir.display()),
        ],
        ProcessEvent::FileProcessed { source, output } => {
            vec![format!("OK {} -> {}", display_name(source), output.display())]
        }
        ProcessEvent::FileSkipped { source, reason } => vec![format!(
            "Unreadable image, skipped: {} ({reason})",
            display_name(source)
        )],
        ProcessEvent::FileFailed { source, reason } => {
            vec![format!("Failed: {} ({reason})", display_name(source))]
        }
    }
}

/// Final line(s) for a completed run.
pub fn format_summary(outcome: &BatchOutcome, input_dir: &Path) -> Vec<String> {
    if outcome.found == 0 {
        return vec![format!("No image files found in: {}", input_dir.display())];
    }
    vec![format!(
        "Done - found: {}, succeeded: {}, failed: {} -> {}",
        outcome.found,
        outcome.succeeded,
        outcome.failed,
        outcome.output_dir.display()
    )]
}

pub fn format_error(err: &dyn std::error::Error) -> String {
    format!("error: {err}")
}

pub fn print_summary(outcome: &BatchOutcome, input_dir: &Path) {
    for line in format_summary(outcome, input_dir) {
        println!("{}", line);
    }
}

pub fn print_error(err: &dyn std::error::Error) {
    eprintln!("{}", format_error(err));
}
