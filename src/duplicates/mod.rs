//! Duplicate detection pipeline: exact indexing, pair enumeration,
//! concurrent comparison and grouping.
//!
//! # Overview
//!
//! Detection runs in four stages:
//! 1. **Exact indexing** ([`index`]): files sharing a content fingerprint
//!    collapse into an exact group immediately and leave the pipeline.
//! 2. **Pair enumeration** ([`pairs`]): the survivors form the full set of
//!    C(n,2) candidate pairs.
//! 3. **Comparison pool** ([`pool`]): batches of pairs are scored
//!    concurrently across a bounded arena of worker threads.
//! 4. **Grouping** ([`grouper`]): accepted similarity edges are merged
//!    into groups; exact groups are emitted first, unchanged.

pub mod grouper;
pub mod index;
pub mod pairs;
pub mod pool;
pub mod score;

pub use grouper::group_similar;
pub use index::{index_by_fingerprint, ExactGroup, IndexStats};
pub use pairs::{enumerate_pairs, CandidatePair};
pub use pool::{
    default_worker_count, ComparisonFailure, ComparisonPool, ContentMap, PoolConfig, PoolOutcome,
    SimilarityEdge, BATCH_SIZE, SIMILARITY_THRESHOLD,
};
pub use score::{DiceScorer, ScoreError, SimilarityScorer};
