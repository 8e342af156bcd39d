//! VADER lexicon scorer.

use crate::types::polarity::PolarityScores;
use crate::{Error, SentimentScorer};
use std::collections::HashMap;
use vader_sentiment::SentimentIntensityAnalyzer;

/// [`SentimentScorer`] backed by the VADER lexicon and rule set.
///
/// The lexicon is compiled into the `vader_sentiment` crate, so construction
/// has no failure mode and no I/O.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for VaderScorer {
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores, Error> {
        let scores = self.analyzer.polarity_scores(text);
        let negative = score_for(&scores, "neg")?;
        let positive = score_for(&scores, "pos")?;

        // vader_sentiment applies its punctuation emphasis even when no token
        // carried any valence, which pushes lexicon-free text below zero. With
        // nothing polar in the text the compound is neutral.
        let compound = if positive == 0.0 && negative == 0.0 {
            0.0
        } else {
            score_for(&scores, "compound")?
        };

        Ok(PolarityScores {
            negative,
            neutral: score_for(&scores, "neu")?,
            positive,
            compound,
        })
    }

    fn scorer_id(&self) -> &str {
        "vader"
    }
}

fn score_for(scores: &HashMap<&str, f64>, key: &str) -> Result<f64, Error> {
    scores
        .get(key)
        .copied()
        .ok_or_else(|| Error::Provider(format!("VADER output is missing the \"{key}\" score")))
}
