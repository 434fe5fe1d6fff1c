//! Greedy single-pass grouping of similarity edges.
//!
//! # Overview
//!
//! Accepted edges are sorted by descending score and merged into groups
//! one at a time: an edge whose endpoints are both unknown opens a new
//! group; an edge with exactly one known endpoint appends the other to
//! that endpoint's group; an edge inside one group is a no-op.
//!
//! # Characterized limitation
//!
//! This is deliberately **not** union-find. When an edge's endpoints sit
//! in two *different* existing groups, no merge happens and the edge is
//! dropped. A file's transitive similarity neighborhood can therefore be
//! split across groups. This mirrors the behavior the tool's output has
//! always had and is covered by tests; switching to true union-find
//! would change observable grouping and must be treated as a behavioral
//! redesign, not a fix.

use std::collections::HashSet;
use std::path::PathBuf;

use super::pool::SimilarityEdge;

/// Cluster similarity edges into groups of near-duplicate files.
///
/// Ties in score keep their relative order (the sort is stable). Group
/// creation order follows the sorted edge order, and files within a
/// group appear in the order they were merged in.
///
/// # Arguments
///
/// * `edges` - Accepted similarity edges, in any order
/// * `on_progress` - Called with the completion percentage (0–100)
///   roughly every 1% of edges processed, and once at 100% even when
///   `edges` is empty
#[must_use]
pub fn group_similar(
    mut edges: Vec<SimilarityEdge>,
    mut on_progress: impl FnMut(f64),
) -> Vec<Vec<PathBuf>> {
    edges.sort_by(|a, b| b.score.total_cmp(&a.score));

    let total = edges.len();
    let step = (total / 100).max(1);

    let mut groups: Vec<Vec<PathBuf>> = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for (processed, edge) in edges.into_iter().enumerate() {
        let report = |on_progress: &mut dyn FnMut(f64)| {
            if (processed + 1) % step == 0 {
                on_progress((processed + 1) as f64 / total as f64 * 100.0);
            }
        };

        if seen.contains(&edge.left) && seen.contains(&edge.right) {
            // Both endpoints already placed. If they are in different
            // groups, they stay there: no cross-group merge.
            report(&mut on_progress);
            continue;
        }

        let mut placed = false;
        for group in &mut groups {
            let has_left = group.contains(&edge.left);
            let has_right = group.contains(&edge.right);

            if has_left && !has_right {
                group.push(edge.right.clone());
                seen.insert(edge.right.clone());
                placed = true;
                break;
            } else if !has_left && has_right {
                group.push(edge.left.clone());
                seen.insert(edge.left.clone());
                placed = true;
                break;
            } else if has_left && has_right {
                placed = true;
                break;
            }
        }

        if !placed {
            seen.insert(edge.left.clone());
            seen.insert(edge.right.clone());
            groups.push(vec![edge.left, edge.right]);
        }

        report(&mut on_progress);
    }

    on_progress(100.0);
    log::debug!("Similarity grouping produced {} groups", groups.len());
    groups
}
