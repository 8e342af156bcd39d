//! Polarity labelling and sentiment result shaping, shared by single and batch analysis.

use crate::error::Error;
use inference::{PolarityScores, SentimentScorer};
use serde::Serialize;
use utoipa::ToSchema;

/// Compound score at or above which text is labelled positive, and at or
/// below whose negation it is labelled negative.
pub const POLARITY_THRESHOLD: f64 = 0.05;

/// Sentiment polarity class derived from the compound score.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POLARITY_THRESHOLD {
            SentimentLabel::Positive
        } else if compound <= -POLARITY_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(fmt, "positive"),
            SentimentLabel::Negative => write!(fmt, "negative"),
            SentimentLabel::Neutral => write!(fmt, "neutral"),
        }
    }
}

/// The three lexicon proportions, rounded.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SentimentDetails {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Sentiment {
    pub label: SentimentLabel,
    /// Absolute value of the compound score, in [0, 1].
    pub score: f64,
    /// Compound polarity, in [-1, 1].
    pub compound: f64,
    pub details: SentimentDetails,
}

impl From<PolarityScores> for Sentiment {
    fn from(scores: PolarityScores) -> Self {
        Sentiment {
            label: SentimentLabel::from_compound(scores.compound),
            score: round4(scores.compound.abs()),
            compound: round4(scores.compound),
            details: SentimentDetails {
                positive: round4(scores.positive),
                neutral: round4(scores.neutral),
                negative: round4(scores.negative),
            },
        }
    }
}

/// Score `text` and shape the result. The label is taken from the unrounded compound.
pub fn score(scorer: &dyn SentimentScorer, text: &str) -> Result<Sentiment, Error> {
    Ok(scorer.polarity_scores(text)?.into())
}

/// Round to 4 decimal places.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
