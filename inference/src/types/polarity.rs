//! Types for lexicon-based polarity scoring.

use serde::{Deserialize, Serialize};

/// Raw output of a polarity scorer for one text.
///
/// `negative`, `neutral` and `positive` are proportions of the text falling in
/// each category and sum to roughly 1. `compound` is the normalized aggregate
/// polarity in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub compound: f64,
}
