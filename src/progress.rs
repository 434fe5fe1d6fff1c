//! Phase-weighted progress reporting.
//!
//! # Overview
//!
//! The pipeline reports one overall 0–100 percentage assembled from six
//! weighted phases. Each phase restarts its own 0–100 sub-range; the
//! [`Tracker`] maps a within-phase percentage onto the overall scale and
//! forwards it to a [`ProgressSink`].
//!
//! Two sinks are provided: [`TermProgress`] renders an indicatif bar for
//! interactive runs, and [`NullSink`] swallows updates for `--quiet`,
//! JSON output and tests. Sinks must tolerate non-monotonic percentages;
//! phase restarts make them routine.

use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Pipeline phases with their share of the overall percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Recursive SVG discovery
    FindFiles,
    /// Reading, validating and fingerprinting files
    LoadFiles,
    /// Exact-duplicate indexing
    FindDuplicates,
    /// Candidate pair enumeration
    CreatePairs,
    /// Concurrent pairwise comparison
    ProcessBatches,
    /// Similarity grouping
    CreateGroups,
}

impl Phase {
    /// Weight of this phase in the overall 0–100 range.
    #[must_use]
    pub fn weight(self) -> f64 {
        match self {
            Self::FindFiles => 5.0,
            Self::LoadFiles => 20.0,
            Self::FindDuplicates => 10.0,
            Self::CreatePairs => 15.0,
            Self::ProcessBatches => 40.0,
            Self::CreateGroups => 10.0,
        }
    }

    /// Human-readable phase label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FindFiles => "Finding SVG files",
            Self::LoadFiles => "Loading SVG files",
            Self::FindDuplicates => "Finding duplicates",
            Self::CreatePairs => "Creating comparison pairs",
            Self::ProcessBatches => "Processing comparisons",
            Self::CreateGroups => "Creating groups",
        }
    }

    /// Overall percentage at which this phase begins.
    #[must_use]
    pub fn start_percent(self) -> f64 {
        const ORDER: [Phase; 6] = [
            Phase::FindFiles,
            Phase::LoadFiles,
            Phase::FindDuplicates,
            Phase::CreatePairs,
            Phase::ProcessBatches,
            Phase::CreateGroups,
        ];

        ORDER
            .iter()
            .take_while(|p| **p != self)
            .map(|p| p.weight())
            .sum()
    }
}

/// Sink for overall progress updates.
///
/// Implementations must tolerate arbitrary update frequency and
/// non-monotonic percentages within a phase.
pub trait ProgressSink: Send + Sync {
    /// Receive an overall percentage (0–100) and the current phase label.
    fn update(&self, percent: f64, phase: &str);

    /// Render the final completed state.
    fn finish(&self);
}

/// Maps within-phase progress onto the overall scale.
#[derive(Clone)]
pub struct Tracker {
    sink: Arc<dyn ProgressSink>,
}

impl Tracker {
    /// Create a tracker forwarding to the given sink.
    #[must_use]
    pub fn new(sink: Arc<dyn ProgressSink>) -> Self {
        Self { sink }
    }

    /// Report progress within a phase, using the phase's default label.
    ///
    /// # Arguments
    ///
    /// * `phase` - Current pipeline phase
    /// * `within` - Percentage (0–100) of the phase itself
    pub fn phase(&self, phase: Phase, within: f64) {
        self.phase_with_label(phase, within, phase.label());
    }

    /// Report progress within a phase under a custom label.
    ///
    /// Used by the comparison phase to carry batch counts, e.g.
    /// `Processing comparisons (3/12)`.
    pub fn phase_with_label(&self, phase: Phase, within: f64, label: &str) {
        let overall = phase.start_percent() + phase.weight() * within / 100.0;
        self.sink.update(overall, label);
    }

    /// Render the final completed state on the sink.
    pub fn finish(&self) {
        self.sink.finish();
    }
}

/// Terminal progress bar backed by indicatif.
pub struct TermProgress {
    bar: ProgressBar,
}

impl TermProgress {
    /// Create and start the terminal progress bar.
    #[must_use]
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template("[{bar:40.green/white}] {pos}% | {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▒ "),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }
}

impl Default for TermProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TermProgress {
    fn update(&self, percent: f64, phase: &str) {
        self.bar.set_position(percent.round().clamp(0.0, 100.0) as u64);
        self.bar.set_message(phase.to_string());
    }

    fn finish(&self) {
        self.bar.set_position(100);
        self.bar.finish_with_message("Complete!");
    }
}

/// Sink that discards all updates.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn update(&self, _percent: f64, _phase: &str) {}

    fn finish(&self) {}
}
