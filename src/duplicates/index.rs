//! Exact-duplicate indexing by content fingerprint.
//!
//! # Overview
//!
//! This is the first elimination stage of duplicate detection. Files
//! whose canonicalized content hashes to the same fingerprint are
//! byte-equivalent for grouping purposes; any fingerprint bucket with
//! two or more members becomes an [`ExactGroup`] and its files skip the
//! pairwise-comparison pipeline entirely. Singleton buckets stay in the
//! remaining set.
//!
//! # Example
//!
//! ```
//! use svgdupe::duplicates::index_by_fingerprint;
//! use svgdupe::scanner::{fingerprint, ClassifiedFile};
//! use std::path::PathBuf;
//!
//! let file = |name: &str, content: &str| ClassifiedFile {
//!     path: PathBuf::from(name),
//!     content: content.to_string(),
//!     fingerprint: fingerprint(content),
//!     size: content.len(),
//! };
//!
//! let files = vec![file("a.svg", "<svg/>"), file("b.svg", "<svg/>"), file("c.svg", "<x/>")];
//! let (groups, remaining, stats) = index_by_fingerprint(files, |_| {});
//!
//! assert_eq!(groups.len(), 1);
//! assert_eq!(remaining.len(), 1);
//! assert_eq!(stats.collapsed_files, 2);
//! ```

use std::collections::HashMap;

use crate::scanner::{fingerprint_to_hex, ClassifiedFile, Fingerprint};

/// A group of files sharing one content fingerprint.
///
/// Always has at least two members; singleton fingerprints are never
/// emitted as groups. File order is first-seen order during indexing.
#[derive(Debug, Clone)]
pub struct ExactGroup {
    /// Shared content fingerprint
    pub fingerprint: Fingerprint,
    /// Member files in first-seen order
    pub files: Vec<std::path::PathBuf>,
}

impl ExactGroup {
    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Statistics from the exact-indexing stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Total files that entered indexing
    pub input_files: usize,
    /// Number of exact groups emitted
    pub exact_groups: usize,
    /// Files placed in exact groups (and removed from comparison)
    pub collapsed_files: usize,
    /// Files left for pairwise comparison
    pub remaining_files: usize,
}

/// Group files by exact fingerprint equality.
///
/// Buckets with 2+ members become [`ExactGroup`]s; the rest of the files
/// are returned for pairwise comparison. Both outputs preserve first-seen
/// order, so results are deterministic for a given input order.
///
/// # Arguments
///
/// * `files` - Classified files in discovery order
/// * `on_progress` - Called with the completion percentage (0–100) as
///   buckets are scanned
pub fn index_by_fingerprint(
    files: Vec<ClassifiedFile>,
    mut on_progress: impl FnMut(f64),
) -> (Vec<ExactGroup>, Vec<ClassifiedFile>, IndexStats) {
    let mut stats = IndexStats {
        input_files: files.len(),
        ..Default::default()
    };

    // Bucket in first-seen order.
    let mut bucket_of: HashMap<Fingerprint, usize> = HashMap::new();
    let mut buckets: Vec<(Fingerprint, Vec<ClassifiedFile>)> = Vec::new();

    for file in files {
        match bucket_of.get(&file.fingerprint) {
            Some(&idx) => buckets[idx].1.push(file),
            None => {
                bucket_of.insert(file.fingerprint, buckets.len());
                buckets.push((file.fingerprint, vec![file]));
            }
        }
    }

    let total_buckets = buckets.len().max(1);
    let mut groups = Vec::new();
    let mut remaining = Vec::new();

    for (scanned, (fp, members)) in buckets.into_iter().enumerate() {
        if members.len() > 1 {
            log::debug!(
                "Exact group {}: {} files",
                fingerprint_to_hex(&fp),
                members.len()
            );
            stats.collapsed_files += members.len();
            groups.push(ExactGroup {
                fingerprint: fp,
                files: members.into_iter().map(|f| f.path).collect(),
            });
        } else {
            remaining.extend(members);
        }
        on_progress((scanned + 1) as f64 / total_buckets as f64 * 100.0);
    }

    stats.exact_groups = groups.len();
    stats.remaining_files = remaining.len();

    log::info!(
        "Exact indexing: {} files -> {} groups ({} files), {} remaining",
        stats.input_files,
        stats.exact_groups,
        stats.collapsed_files,
        stats.remaining_files
    );

    (groups, remaining, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::fingerprint;
    use std::path::PathBuf;

    fn file(name: &str, content: &str) -> ClassifiedFile {
        ClassifiedFile {
            path: PathBuf::from(name),
            content: content.to_string(),
            fingerprint: fingerprint(content),
            size: content.len(),
        }
    }

    #[test]
    fn test_duplicates_collapse_in_first_seen_order() {
        let files = vec![
            file("a.svg", "<svg/>"),
            file("b.svg", "<x/>"),
            file("c.svg", "<svg/>"),
            file("d.svg", "<svg/>"),
        ];

        let (groups, remaining, stats) = index_by_fingerprint(files, |_| {});

        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].files,
            vec![
                PathBuf::from("a.svg"),
                PathBuf::from("c.svg"),
                PathBuf::from("d.svg")
            ]
        );
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].path, PathBuf::from("b.svg"));
        assert_eq!(stats.collapsed_files, 3);
        assert_eq!(stats.remaining_files, 1);
    }

    #[test]
    fn test_singletons_are_not_groups() {
        let files = vec![file("a.svg", "<a/>"), file("b.svg", "<b/>")];
        let (groups, remaining, stats) = index_by_fingerprint(files, |_| {});

        assert!(groups.is_empty());
        assert_eq!(remaining.len(), 2);
        assert_eq!(stats.exact_groups, 0);
    }

    #[test]
    fn test_empty_input() {
        let (groups, remaining, stats) = index_by_fingerprint(Vec::new(), |_| {});
        assert!(groups.is_empty());
        assert!(remaining.is_empty());
        assert_eq!(stats, IndexStats::default());
    }

    #[test]
    fn test_progress_reaches_completion() {
        let files = vec![file("a.svg", "<a/>"), file("b.svg", "<a/>")];
        let mut last = 0.0;
        index_by_fingerprint(files, |p| last = p);
        assert_eq!(last, 100.0);
    }
}
