//! Scanner module for SVG discovery and content classification.
//!
//! This module provides functionality for:
//! - Recursive discovery of `.svg` files under a root directory
//! - Content validation and canonicalization
//! - BLAKE3 content fingerprinting
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and SVG file discovery
//! - [`canonical`]: Canonicalization of SVG markup for stable comparison
//! - [`classify`]: Per-file validation, canonicalization and fingerprinting
//! - [`hasher`]: BLAKE3 content fingerprints
//!
//! # Example
//!
//! ```no_run
//! use svgdupe::scanner::{find_svg_files, load_files, Canonicalizer};
//! use std::path::Path;
//!
//! let files = find_svg_files(Path::new("./icons")).unwrap();
//! let canonicalizer = Canonicalizer::new().unwrap();
//! let (classified, problems) = load_files(&files, &canonicalizer, |_| {});
//! println!("{} usable, {} problematic", classified.len(), problems.len());
//! ```

pub mod canonical;
pub mod classify;
pub mod hasher;
pub mod walker;

use std::path::PathBuf;

use serde::Serialize;

// Re-export main types
pub use canonical::{CanonicalizeError, Canonicalizer};
pub use classify::{classify, load_files, ClassifiedFile, ClassifyError};
pub use hasher::{fingerprint, fingerprint_to_hex, Fingerprint};
pub use walker::find_svg_files;

/// A file that could not be classified or compared, with the reason.
///
/// Problem files are accumulated across the whole pipeline and reported
/// at the end of a run; they never abort processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemFile {
    /// Path to the affected file
    pub path: PathBuf,
    /// Human-readable description of what went wrong
    pub reason: String,
}

impl ProblemFile {
    /// Create a new problem-file record.
    #[must_use]
    pub fn new(path: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            path,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during SVG file discovery.
///
/// All variants are fatal: discovery either yields a usable file list
/// or the run is aborted with one of these.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified path was not found or could not be accessed.
    #[error("Directory not accessible: {}\n\nPlease check that the path exists and you have permission to read it.", .0.display())]
    NotAccessible(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// No SVG files were found under the root directory.
    #[error("No SVG files found in directory: {}\n\nPlease check that the directory contains SVG files.", .0.display())]
    NoSvgFiles(PathBuf),
}
