//! Polarity scorer trait.

use crate::types::polarity::PolarityScores;
use crate::Error;

/// Abstraction for a lexicon/rule-based sentiment polarity analyzer.
///
/// Implementations are loaded once at startup and shared read-only across
/// requests, so they must be safe to call concurrently. Scoring is
/// deterministic for identical input.
pub trait SentimentScorer: Send + Sync {
    /// Score `text`, returning the negative/neutral/positive proportions and
    /// the compound polarity.
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores, Error>;

    /// Return a short identifier for this scorer (e.g., "vader").
    fn scorer_id(&self) -> &str;
}
