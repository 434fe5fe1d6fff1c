//! Per-file content classification.
//!
//! # Overview
//!
//! Classification turns a path into a [`ClassifiedFile`]: the file is
//! read, validated as SVG, canonicalized and fingerprinted. Validation
//! failures are recoverable: the file is excluded from comparison and
//! recorded as a [`ProblemFile`](super::ProblemFile), never raised as a
//! fatal error.
//!
//! Canonicalization failures are weaker still: the raw content is used
//! as the comparison/fingerprint basis and the error is only logged.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::canonical::Canonicalizer;
use super::hasher::{fingerprint, Fingerprint};
use super::ProblemFile;

/// Errors that mark a file as unusable for duplicate detection.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The file could not be read.
    #[error("Could not read file: {source}")]
    Unreadable {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is empty or contains only whitespace.
    #[error("Empty file")]
    Empty,

    /// The content lacks SVG root-element markers.
    #[error("Not a valid SVG file")]
    NotSvg,
}

/// A file that passed classification.
///
/// Holds the content actually used for comparison: the canonical form
/// when canonicalization succeeded, the raw content otherwise.
#[derive(Debug, Clone)]
pub struct ClassifiedFile {
    /// Path to the file
    pub path: PathBuf,
    /// Content used for fingerprinting and similarity comparison
    pub content: String,
    /// BLAKE3 fingerprint of `content`
    pub fingerprint: Fingerprint,
    /// Length of `content` in bytes, used by the size-ratio prefilter
    pub size: usize,
}

/// Classify a single SVG file.
///
/// Reads the file, validates it (non-empty, contains both `<svg` and
/// `</svg>` markers), then canonicalizes and fingerprints it. If
/// canonicalization fails the raw content is fingerprinted instead; that
/// fallback always yields a usable result.
///
/// # Arguments
///
/// * `path` - File to classify
/// * `canonicalizer` - Shared canonicalizer instance
///
/// # Errors
///
/// Returns [`ClassifyError`] when the file is unreadable, empty or not
/// structurally SVG. These errors are recoverable by design; callers
/// record them and continue.
pub fn classify(path: &Path, canonicalizer: &Canonicalizer) -> Result<ClassifiedFile, ClassifyError> {
    let raw = fs::read_to_string(path).map_err(|source| ClassifyError::Unreadable { source })?;

    if raw.trim().is_empty() {
        return Err(ClassifyError::Empty);
    }

    if !raw.contains("<svg") || !raw.contains("</svg>") {
        return Err(ClassifyError::NotSvg);
    }

    let content = match canonicalizer.canonicalize(&raw) {
        Ok(canonical) => canonical,
        Err(e) => {
            log::debug!(
                "Canonicalization failed for {}, using raw content: {}",
                path.display(),
                e
            );
            raw
        }
    };

    Ok(ClassifiedFile {
        path: path.to_path_buf(),
        fingerprint: fingerprint(&content),
        size: content.len(),
        content,
    })
}

/// Classify a list of files, splitting successes from problem files.
///
/// # Arguments
///
/// * `files` - Paths to classify, in discovery order
/// * `canonicalizer` - Shared canonicalizer instance
/// * `on_progress` - Called with the completion percentage (0–100) after
///   each file
pub fn load_files(
    files: &[PathBuf],
    canonicalizer: &Canonicalizer,
    mut on_progress: impl FnMut(f64),
) -> (Vec<ClassifiedFile>, Vec<ProblemFile>) {
    let mut classified = Vec::with_capacity(files.len());
    let mut problems = Vec::new();

    for (idx, path) in files.iter().enumerate() {
        match classify(path, canonicalizer) {
            Ok(file) => classified.push(file),
            Err(e) => {
                log::warn!("Could not process {}: {}", path.display(), e);
                problems.push(ProblemFile::new(path.clone(), e.to_string()));
            }
        }
        on_progress((idx + 1) as f64 / files.len() as f64 * 100.0);
    }

    (classified, problems)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn canon() -> Canonicalizer {
        Canonicalizer::new().unwrap()
    }

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_classify_valid_svg() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "a.svg", "<?xml version=\"1.0\"?><svg><rect/></svg>");

        let file = classify(&path, &canon()).unwrap();
        assert_eq!(file.content, "<svg><rect/></svg>");
        assert_eq!(file.size, file.content.len());
        assert_eq!(file.fingerprint, fingerprint("<svg><rect/></svg>"));
    }

    #[test]
    fn test_empty_file_rejected() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "empty.svg", "   \n  ");

        let err = classify(&path, &canon()).unwrap_err();
        assert_eq!(err.to_string(), "Empty file");
    }

    #[test]
    fn test_non_svg_rejected() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "nope.svg", "<html><body/></html>");

        let err = classify(&path, &canon()).unwrap_err();
        assert_eq!(err.to_string(), "Not a valid SVG file");
    }

    #[test]
    fn test_canonicalization_failure_falls_back_to_raw() {
        let dir = tempdir().unwrap();
        // Unterminated comment makes canonicalization fail, but the file
        // still classifies using the raw content.
        let raw = "<svg><!-- broken <rect/></svg>";
        let path = write(dir.path(), "broken.svg", raw);

        let file = classify(&path, &canon()).unwrap();
        assert_eq!(file.content, raw);
        assert_eq!(file.fingerprint, fingerprint(raw));
    }

    #[test]
    fn test_load_files_splits_and_reports_progress() {
        let dir = tempdir().unwrap();
        let good = write(dir.path(), "good.svg", "<svg><rect/></svg>");
        let bad = write(dir.path(), "bad.svg", "");

        let mut percents = Vec::new();
        let (classified, problems) =
            load_files(&[good.clone(), bad.clone()], &canon(), |p| percents.push(p));

        assert_eq!(classified.len(), 1);
        assert_eq!(classified[0].path, good);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].path, bad);
        assert_eq!(problems[0].reason, "Empty file");
        assert_eq!(percents, vec![50.0, 100.0]);
    }
}
