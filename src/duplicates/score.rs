//! Pairwise similarity scoring.
//!
//! The default scorer is the Sørensen–Dice bigram coefficient, matching
//! the behavior of the `string-similarity` comparison the tool's output
//! was calibrated against. Scoring sits behind a trait so the comparison
//! pool can be exercised with failing or slow scorers in tests.

use thiserror::Error;

/// Error produced when a single pair fails to score.
///
/// Scoring errors are isolated to the pair that raised them; they never
/// abort a batch or the pool.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct ScoreError {
    /// Description of the failure
    pub reason: String,
}

impl ScoreError {
    /// Create a new scoring error.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Textual similarity scoring function.
///
/// Implementations must be deterministic, side-effect free and safe to
/// call concurrently from multiple worker threads.
pub trait SimilarityScorer: Send + Sync {
    /// Score two contents, returning a value in `[0, 1]`.
    fn score(&self, left: &str, right: &str) -> Result<f64, ScoreError>;
}

/// Sørensen–Dice bigram similarity.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiceScorer;

impl SimilarityScorer for DiceScorer {
    fn score(&self, left: &str, right: &str) -> Result<f64, ScoreError> {
        Ok(strsim::sorensen_dice(left, right))
    }
}
