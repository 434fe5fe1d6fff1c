use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use svgdupe::duplicates::{
    enumerate_pairs, CandidatePair, ComparisonPool, ContentMap, PoolConfig, ScoreError,
    SimilarityScorer,
};

fn contents(names: &[&str]) -> Arc<ContentMap> {
    Arc::new(
        names
            .iter()
            .map(|n| (PathBuf::from(*n), format!("<svg>{n}</svg>")))
            .collect::<HashMap<_, _>>(),
    )
}

fn all_pairs(names: &[&str]) -> Vec<CandidatePair> {
    let files: Vec<PathBuf> = names.iter().map(PathBuf::from).collect();
    enumerate_pairs(&files, |_| {})
}

/// Scorer that sleeps and tracks how many batches are active at once.
///
/// With a batch size of one, each active scorer call corresponds to one
/// in-flight batch, so the high-water mark bounds batch concurrency.
struct TrackingScorer {
    active: AtomicUsize,
    high_water: AtomicUsize,
}

impl TrackingScorer {
    fn new() -> Self {
        Self {
            active: AtomicUsize::new(0),
            high_water: AtomicUsize::new(0),
        }
    }
}

impl SimilarityScorer for TrackingScorer {
    fn score(&self, _: &str, _: &str) -> Result<f64, ScoreError> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.high_water.fetch_max(now, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(15));
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(0.0)
    }
}

/// Scorer that fails only for the marked file.
struct FailsOnMarker;

impl SimilarityScorer for FailsOnMarker {
    fn score(&self, left: &str, right: &str) -> Result<f64, ScoreError> {
        if left.contains("marked") || right.contains("marked") {
            Err(ScoreError::new("scoring blew up"))
        } else {
            Ok(1.0)
        }
    }
}

#[test]
fn test_concurrent_batches_never_exceed_worker_count() {
    let scorer = Arc::new(TrackingScorer::new());
    let names: Vec<String> = (0..6).map(|i| format!("f{i}.svg")).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();

    let config = PoolConfig::default()
        .with_worker_count(2)
        .with_batch_size(1)
        .with_scorer(Arc::clone(&scorer) as Arc<dyn SimilarityScorer>);

    // 15 single-pair batches across 2 worker slots.
    let outcome = ComparisonPool::new(config).run(all_pairs(&name_refs), contents(&name_refs));

    assert!(outcome.edges.is_empty());
    assert!(scorer.high_water.load(Ordering::SeqCst) <= 2);
}

#[test]
fn test_single_worker_serializes_batches() {
    let scorer = Arc::new(TrackingScorer::new());
    let config = PoolConfig::default()
        .with_worker_count(1)
        .with_batch_size(1)
        .with_scorer(Arc::clone(&scorer) as Arc<dyn SimilarityScorer>);

    ComparisonPool::new(config).run(all_pairs(&["a", "b", "c", "d"]), contents(&["a", "b", "c", "d"]));

    assert_eq!(scorer.high_water.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failing_pair_does_not_block_its_batch() {
    // One batch containing every pair; the pairs touching "marked.svg"
    // fail, the rest still produce edges.
    let names = ["a.svg", "marked.svg", "b.svg"];
    let config = PoolConfig::default()
        .with_worker_count(1)
        .with_scorer(Arc::new(FailsOnMarker));

    let outcome = ComparisonPool::new(config).run(all_pairs(&names), contents(&names));

    assert_eq!(outcome.failures.len(), 2);
    assert_eq!(outcome.edges.len(), 1);
    assert_eq!(outcome.edges[0].left, PathBuf::from("a.svg"));
    assert_eq!(outcome.edges[0].right, PathBuf::from("b.svg"));
    for failure in &outcome.failures {
        assert_eq!(failure.reason, "scoring blew up");
        assert!(failure.files.contains(&PathBuf::from("marked.svg")));
    }
}

#[test]
fn test_more_workers_than_batches() {
    let config = PoolConfig::default().with_worker_count(16);
    let outcome = ComparisonPool::new(config).run(all_pairs(&["a", "b"]), contents(&["a", "b"]));

    // One batch, sixteen-slot budget: the pool spawns a single worker
    // and drains cleanly.
    assert_eq!(outcome.faulted_batches, 0);
    assert!(outcome.failures.is_empty());
}

#[test]
fn test_empty_pair_list_signals_completion_exactly_once() {
    let completions = Arc::new(AtomicUsize::new(0));
    let completions_cb = Arc::clone(&completions);
    let config = PoolConfig::default().with_progress(Arc::new(move |_, _| {
        completions_cb.fetch_add(1, Ordering::SeqCst);
    }));

    let outcome = ComparisonPool::new(config).run(Vec::new(), contents(&[]));

    assert!(outcome.edges.is_empty());
    assert!(outcome.failures.is_empty());
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}
