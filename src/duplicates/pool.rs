//! Concurrent pairwise-comparison pool.
//!
//! # Overview
//!
//! Candidate pairs are split into fixed-size batches and processed by a
//! bounded arena of OS worker threads. At most `min(worker_count,
//! batch_count)` workers are in flight at any time; as each worker
//! finishes its batch, the orchestrator merges the result and
//! immediately dispatches the next unassigned batch into the freed slot.
//!
//! Workers share no mutable state. Each worker's only output is a single
//! message carrying its accepted edges and per-pair failures; the
//! orchestrator owns the accumulated result. A panicking worker loses
//! only its own batch: the fault is logged as a warning and the pool
//! continues.
//!
//! # Example
//!
//! ```
//! use svgdupe::duplicates::{ComparisonPool, PoolConfig, enumerate_pairs};
//! use std::collections::HashMap;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! let contents: HashMap<PathBuf, String> = [
//!     (PathBuf::from("a.svg"), "<svg><rect/></svg>".to_string()),
//!     (PathBuf::from("b.svg"), "<svg><rect /></svg>".to_string()),
//! ]
//! .into();
//! let files: Vec<PathBuf> = contents.keys().cloned().collect();
//! let pairs = enumerate_pairs(&files, |_| {});
//!
//! let pool = ComparisonPool::new(PoolConfig::default());
//! let outcome = pool.run(pairs, Arc::new(contents));
//! assert!(outcome.failures.is_empty());
//! ```

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use super::pairs::CandidatePair;
use super::score::{DiceScorer, SimilarityScorer};

/// Maximum number of candidate pairs per batch.
pub const BATCH_SIZE: usize = 200;

/// Minimum similarity score for a pair to become an edge.
pub const SIMILARITY_THRESHOLD: f64 = 0.9;

/// Maximum relative size difference before a pair is skipped unscored.
pub const SIZE_RATIO_LIMIT: f64 = 0.5;

/// Lookup table from file path to comparison content.
///
/// Read-only from every worker's perspective; must not be mutated after
/// the pool starts.
pub type ContentMap = HashMap<PathBuf, String>;

/// Callback invoked after each completed batch with
/// `(completed_batches, total_batches)`.
pub type BatchProgressFn = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// An accepted similarity result for one candidate pair.
///
/// Oriented as the producing pair was: `left` precedes `right` in
/// discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityEdge {
    /// Earlier file of the pair
    pub left: PathBuf,
    /// Later file of the pair
    pub right: PathBuf,
    /// Similarity score in `[threshold, 1]`
    pub score: f64,
}

/// A pair whose comparison failed.
///
/// Recorded and surfaced at the end of the run; never fatal to the
/// batch or the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonFailure {
    /// Both files involved in the failed comparison
    pub files: [PathBuf; 2],
    /// Description of the failure
    pub reason: String,
}

/// Configuration for the comparison pool.
#[derive(Clone)]
pub struct PoolConfig {
    /// Number of concurrent worker threads.
    /// Defaults to available parallelism minus one, floor 1.
    pub worker_count: usize,
    /// Maximum pairs per batch.
    pub batch_size: usize,
    /// Similarity acceptance threshold.
    pub threshold: f64,
    /// Scoring function applied to each surviving pair.
    pub scorer: Arc<dyn SimilarityScorer>,
    /// Optional per-batch completion callback.
    pub on_batch_complete: Option<BatchProgressFn>,
}

impl std::fmt::Debug for PoolConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolConfig")
            .field("worker_count", &self.worker_count)
            .field("batch_size", &self.batch_size)
            .field("threshold", &self.threshold)
            .field("scorer", &"<scorer>")
            .field(
                "on_batch_complete",
                &self.on_batch_complete.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
            batch_size: BATCH_SIZE,
            threshold: SIMILARITY_THRESHOLD,
            scorer: Arc::new(DiceScorer),
            on_batch_complete: None,
        }
    }
}

impl PoolConfig {
    /// Set the number of concurrent workers.
    #[must_use]
    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_count = count.max(1);
        self
    }

    /// Set the maximum batch size.
    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Set the similarity acceptance threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the similarity scorer.
    #[must_use]
    pub fn with_scorer(mut self, scorer: Arc<dyn SimilarityScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Set the per-batch completion callback.
    #[must_use]
    pub fn with_progress(mut self, callback: BatchProgressFn) -> Self {
        self.on_batch_complete = Some(callback);
        self
    }
}

/// Default worker count: available parallelism minus one, floor 1.
#[must_use]
pub fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2)
        .saturating_sub(1)
        .max(1)
}

/// Accumulated result of a pool run.
#[derive(Debug, Default)]
pub struct PoolOutcome {
    /// Accepted similarity edges from all completed batches
    pub edges: Vec<SimilarityEdge>,
    /// Per-pair comparison failures from all completed batches
    pub failures: Vec<ComparisonFailure>,
    /// Batches lost to worker panics
    pub faulted_batches: usize,
}

/// Result of one worker processing one batch.
#[derive(Debug, Default)]
struct BatchResult {
    edges: Vec<SimilarityEdge>,
    failures: Vec<ComparisonFailure>,
}

/// Completion message sent by a worker exactly once.
struct BatchDone {
    slot: usize,
    /// `None` when the worker panicked mid-batch.
    result: Option<BatchResult>,
}

/// Bounded pool of comparison workers with dynamic batch reassignment.
pub struct ComparisonPool {
    config: PoolConfig,
}

impl ComparisonPool {
    /// Create a pool with the given configuration.
    #[must_use]
    pub fn new(config: PoolConfig) -> Self {
        Self { config }
    }

    /// Compare all candidate pairs and collect edges and failures.
    ///
    /// Returns immediately (signalling completion once) when `pairs` is
    /// empty. Edge order reflects batch-local pair order, but batches
    /// complete in arbitrary order; callers must not rely on the overall
    /// interleaving.
    ///
    /// # Arguments
    ///
    /// * `pairs` - Candidate pairs, consumed in batch-sized chunks
    /// * `contents` - Read-only path-to-content lookup shared by all
    ///   workers
    #[must_use]
    pub fn run(&self, pairs: Vec<CandidatePair>, contents: Arc<ContentMap>) -> PoolOutcome {
        let mut outcome = PoolOutcome::default();

        let batches: Vec<Vec<CandidatePair>> = pairs
            .chunks(self.config.batch_size)
            .map(<[CandidatePair]>::to_vec)
            .collect();
        let total = batches.len();

        if total == 0 {
            if let Some(ref callback) = self.config.on_batch_complete {
                callback(0, 0);
            }
            return outcome;
        }

        let active = self.config.worker_count.min(total);
        log::debug!(
            "Comparison pool: {} batches across {} workers",
            total,
            active
        );

        let (tx, rx) = mpsc::channel::<BatchDone>();
        let mut slots: Vec<Option<thread::JoinHandle<()>>> =
            (0..active).map(|_| None).collect();
        let mut batch_iter = batches.into_iter();

        for slot in 0..active {
            if let Some(batch) = batch_iter.next() {
                slots[slot] = Some(self.dispatch(slot, batch, &contents, &tx));
            }
        }

        let mut in_flight = active;
        let mut completed = 0usize;

        while in_flight > 0 {
            let done = match rx.recv() {
                Ok(done) => done,
                Err(_) => {
                    // Unreachable while we hold `tx`, but never hang on it.
                    log::warn!("Comparison pool channel closed with {} workers in flight", in_flight);
                    break;
                }
            };

            // Reap the finished thread before reusing its slot.
            if let Some(handle) = slots[done.slot].take() {
                let _ = handle.join();
            }

            match done.result {
                Some(result) => {
                    outcome.edges.extend(result.edges);
                    outcome.failures.extend(result.failures);
                }
                None => {
                    outcome.faulted_batches += 1;
                    log::warn!(
                        "Comparison worker in slot {} terminated unexpectedly; its batch produced no results",
                        done.slot
                    );
                }
            }

            completed += 1;
            in_flight -= 1;

            if let Some(ref callback) = self.config.on_batch_complete {
                callback(completed, total);
            }

            if let Some(batch) = batch_iter.next() {
                slots[done.slot] = Some(self.dispatch(done.slot, batch, &contents, &tx));
                in_flight += 1;
            }
        }

        log::info!(
            "Comparison pool complete: {} edges, {} failures, {} faulted batches",
            outcome.edges.len(),
            outcome.failures.len(),
            outcome.faulted_batches
        );

        outcome
    }

    /// Spawn a worker for one batch in the given slot.
    fn dispatch(
        &self,
        slot: usize,
        batch: Vec<CandidatePair>,
        contents: &Arc<ContentMap>,
        tx: &mpsc::Sender<BatchDone>,
    ) -> thread::JoinHandle<()> {
        let contents = Arc::clone(contents);
        let scorer = Arc::clone(&self.config.scorer);
        let threshold = self.config.threshold;
        let tx = tx.clone();

        thread::spawn(move || {
            let result = catch_unwind(AssertUnwindSafe(|| {
                process_batch(&batch, &contents, scorer.as_ref(), threshold)
            }));
            // The orchestrator outlives every worker; a failed send only
            // happens after it has already given up on the channel.
            let _ = tx.send(BatchDone {
                slot,
                result: result.ok(),
            });
        })
    }
}

/// Process one batch sequentially.
///
/// Pairs with missing content are skipped. The size-ratio prefilter
/// rejects pairs whose contents differ in length by more than
/// [`SIZE_RATIO_LIMIT`] before any scoring happens.
fn process_batch(
    batch: &[CandidatePair],
    contents: &ContentMap,
    scorer: &dyn SimilarityScorer,
    threshold: f64,
) -> BatchResult {
    let mut result = BatchResult::default();

    for pair in batch {
        let (Some(left), Some(right)) = (contents.get(&pair.left), contents.get(&pair.right))
        else {
            continue;
        };

        if size_ratio_exceeded(left.len(), right.len()) {
            continue;
        }

        match scorer.score(left, right) {
            Ok(score) if score >= threshold => result.edges.push(SimilarityEdge {
                left: pair.left.clone(),
                right: pair.right.clone(),
                score,
            }),
            Ok(_) => {}
            Err(e) => result.failures.push(ComparisonFailure {
                files: [pair.left.clone(), pair.right.clone()],
                reason: e.to_string(),
            }),
        }
    }

    result
}

/// Check whether two content lengths differ by more than the prefilter
/// limit, relative to the larger of the two.
fn size_ratio_exceeded(left: usize, right: usize) -> bool {
    let max = left.max(right);
    if max == 0 {
        return false;
    }
    (left.abs_diff(right) as f64 / max as f64) > SIZE_RATIO_LIMIT
}
