//! Candidate pair enumeration.
//!
//! # Overview
//!
//! Files that survive exact-duplicate indexing are compared pairwise.
//! This module produces the full unordered candidate set: exactly
//! C(n,2) pairs for n files, no self-pairs, no duplicate pairs. Input
//! order is the total order, so a pair is always stored with the earlier
//! file on the left.
//!
//! Pairs are materialized eagerly; for corpora where n² pressure
//! matters, this is the place to switch to streaming.

use std::path::PathBuf;

/// An unordered pair of comparison candidates.
///
/// `left` precedes `right` in discovery order, which fixes the
/// orientation of any similarity edge produced from this pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidatePair {
    /// Earlier file of the pair
    pub left: PathBuf,
    /// Later file of the pair
    pub right: PathBuf,
}

/// Enumerate all unique unordered pairs of the given files.
///
/// Produces an empty vector for fewer than two files.
///
/// # Arguments
///
/// * `files` - Remaining files in discovery order
/// * `on_progress` - Called with the completion percentage (0–100)
///   roughly every 1% of pairs created, and once at 100%
#[must_use]
pub fn enumerate_pairs(
    files: &[PathBuf],
    mut on_progress: impl FnMut(f64),
) -> Vec<CandidatePair> {
    if files.len() < 2 {
        on_progress(100.0);
        return Vec::new();
    }

    let total = files.len() * (files.len() - 1) / 2;
    let step = (total / 100).max(1);
    let mut pairs = Vec::with_capacity(total);

    for i in 0..files.len() - 1 {
        for j in i + 1..files.len() {
            pairs.push(CandidatePair {
                left: files[i].clone(),
                right: files[j].clone(),
            });
            if pairs.len() % step == 0 {
                on_progress(pairs.len() as f64 / total as f64 * 100.0);
            }
        }
    }

    on_progress(100.0);
    log::debug!("Enumerated {} candidate pairs from {} files", pairs.len(), files.len());
    pairs
}
