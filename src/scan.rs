//! Input discovery and output directory preparation.
//!
//! Discovery is a flat, non-recursive listing of the input folder. A file is
//! a candidate when its extension (case-insensitive) is one of
//! [`IMAGE_EXTENSIONS`]; anything else, including subdirectories, is
//! ignored. Whether a candidate actually decodes is not checked here, that
//! is the batch driver's job.
//!
//! Candidates come back sorted by path so runs are reproducible regardless
//! of the filesystem's listing order.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Input folder not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("Input path is not a folder: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot create output folder {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Recognized image extensions, lowercase.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif"];

/// List candidate image files directly inside `dir`, sorted by path.
///
/// An existing but empty (or image-free) folder yields an empty list.
pub fn find_images(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !dir.exists() {
        return Err(ScanError::DirectoryNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if is_image(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Create `dir` and any missing parents. Succeeds if it already exists.
pub fn ensure_output_dir(dir: &Path) -> Result<(), ScanError> {
    std::fs::create_dir_all(dir).map_err(|source| ScanError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn finds_only_recognized_extensions() {
        let tmp = TempDir::new().unwrap();
        for name in ["a.jpg", "b.jpeg", "c.png", "d.bmp", "e.gif", "notes.txt", "f.webp", "g.tiff"] {
            touch(tmp.path(), name);
        }

        let found = find_images(tmp.path()).unwrap();
        assert_eq!(names(&found), ["a.jpg", "b.jpeg", "c.png", "d.bmp", "e.gif"]);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "UPPER.JPG");
        touch(tmp.path(), "Mixed.PnG");

        assert_eq!(find_images(tmp.path()).unwrap().len(), 2);
    }

    #[test]
    fn results_are_sorted() {
        let tmp = TempDir::new().unwrap();
        for name in ["zeta.png", "alpha.png", "mid.jpg"] {
            touch(tmp.path(), name);
        }

        let found = find_images(tmp.path()).unwrap();
        assert_eq!(names(&found), ["alpha.png", "mid.jpg", "zeta.png"]);
    }

    #[test]
    fn does_not_recurse_or_list_directories() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("nested.jpg");
        std::fs::create_dir(&nested).unwrap();
        touch(&nested, "inner.jpg");
        touch(tmp.path(), "top.jpg");

        let found = find_images(tmp.path()).unwrap();
        assert_eq!(names(&found), ["top.jpg"]);
    }

    #[test]
    fn files_without_extension_are_ignored() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "jpg");
        touch(tmp.path(), "README");

        assert!(find_images(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn empty_directory_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(find_images(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_errors() {
        let tmp = TempDir::new().unwrap();
        let result = find_images(&tmp.path().join("nope"));
        assert!(matches!(result, Err(ScanError::DirectoryNotFound(_))));
    }

    #[test]
    fn file_as_input_errors() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "photo.jpg");
        let result = find_images(&tmp.path().join("photo.jpg"));
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    // =========================================================================
    // ensure_output_dir
    // =========================================================================

    #[test]
    fn creates_nested_output_dir() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("a/b/c");

        ensure_output_dir(&out).unwrap();
        assert!(out.is_dir());
    }

    #[test]
    fn existing_output_dir_is_fine() {
        let tmp = TempDir::new().unwrap();
        ensure_output_dir(tmp.path()).unwrap();
        ensure_output_dir(tmp.path()).unwrap();
    }

    #[test]
    fn file_in_the_way_is_output_dir_error() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "taken");

        let result = ensure_output_dir(&tmp.path().join("taken"));
        assert!(matches!(result, Err(ScanError::OutputDir { .. })));
    }
}
