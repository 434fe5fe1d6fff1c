//! Final report assembly and rendering.
//!
//! The pipeline's outputs (exact groups, similarity groups and problem
//! files) are folded into a single [`Report`], rendered either
//! as a colored terminal listing ([`text`]) or as JSON ([`json`]).

pub mod json;
pub mod text;

use std::path::PathBuf;

use serde::Serialize;

use crate::duplicates::ExactGroup;
use crate::scanner::{fingerprint_to_hex, ProblemFile};

/// How a group was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    /// Members share a content fingerprint
    Exact,
    /// Members were clustered from similarity edges
    Similar,
}

/// One group of duplicate or near-duplicate files.
#[derive(Debug, Clone, Serialize)]
pub struct ReportGroup {
    /// How this group was produced
    pub kind: GroupKind,
    /// Shared content fingerprint (exact groups only), as hex
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    /// Member files
    pub files: Vec<PathBuf>,
}

/// Aggregate counters for the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// SVG files discovered under the root
    pub total_files: usize,
    /// Groups in the report
    pub group_count: usize,
    /// Files across all groups
    pub grouped_files: usize,
    /// Groups produced by exact fingerprint matching
    pub exact_groups: usize,
    /// Groups produced by similarity clustering
    pub similar_groups: usize,
    /// Files that could not be classified or compared
    pub problem_files: usize,
}

/// Complete result of a run.
///
/// Exact groups always precede similarity groups, each set in its
/// production order.
#[derive(Debug, Serialize)]
pub struct Report {
    /// All groups, exact first
    pub groups: Vec<ReportGroup>,
    /// Files excluded from grouping, with reasons
    pub problem_files: Vec<ProblemFile>,
    /// Aggregate counters
    pub summary: Summary,
}

impl Report {
    /// Assemble the final report from pipeline outputs.
    ///
    /// # Arguments
    ///
    /// * `total_files` - Count of discovered SVG files
    /// * `exact` - Exact groups from fingerprint indexing
    /// * `similar` - Groups from similarity clustering
    /// * `problem_files` - Accumulated classification/comparison failures
    #[must_use]
    pub fn build(
        total_files: usize,
        exact: Vec<ExactGroup>,
        similar: Vec<Vec<PathBuf>>,
        problem_files: Vec<ProblemFile>,
    ) -> Self {
        let mut summary = Summary {
            total_files,
            exact_groups: exact.len(),
            similar_groups: similar.len(),
            problem_files: problem_files.len(),
            ..Default::default()
        };

        let mut groups = Vec::with_capacity(exact.len() + similar.len());
        for group in exact {
            groups.push(ReportGroup {
                kind: GroupKind::Exact,
                fingerprint: Some(fingerprint_to_hex(&group.fingerprint)),
                files: group.files,
            });
        }
        for files in similar {
            groups.push(ReportGroup {
                kind: GroupKind::Similar,
                fingerprint: None,
                files,
            });
        }

        summary.group_count = groups.len();
        summary.grouped_files = groups.iter().map(|g| g.files.len()).sum();

        Self {
            groups,
            problem_files,
            summary,
        }
    }
}
