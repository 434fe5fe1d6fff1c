//! Recursive SVG file discovery.
//!
//! # Overview
//!
//! This module walks a directory tree and collects every file with a
//! `.svg` extension (case-insensitive). Unreadable subdirectories are
//! logged as warnings and skipped; only an unusable root or an empty
//! result is fatal.
//!
//! # Example
//!
//! ```no_run
//! use svgdupe::scanner::find_svg_files;
//! use std::path::Path;
//!
//! let files = find_svg_files(Path::new("/home/user/icons")).unwrap();
//! for file in &files {
//!     println!("{}", file.display());
//! }
//! ```

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::ScanError;

/// Find all SVG files under the given root directory.
///
/// Traversal is depth-first with sorted directory entries so the
/// resulting file order is stable across runs on the same tree.
///
/// # Arguments
///
/// * `root` - Directory to search recursively
///
/// # Errors
///
/// Returns [`ScanError::NotAccessible`] if the root cannot be read,
/// [`ScanError::NotADirectory`] if it is a file, and
/// [`ScanError::NoSvgFiles`] if the walk finds no matching files.
pub fn find_svg_files(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let meta = std::fs::metadata(root)
        .map_err(|_| ScanError::NotAccessible(root.to_path_buf()))?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Could not read directory entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() && has_svg_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        return Err(ScanError::NoSvgFiles(root.to_path_buf()));
    }

    log::debug!("Discovered {} SVG files under {}", files.len(), root.display());
    Ok(files)
}

/// Check whether a path has a `.svg` extension, case-insensitively.
fn has_svg_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}
