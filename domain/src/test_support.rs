//! Fake model capabilities for tests in this crate and in `web` (behind the `mock` feature).

use async_trait::async_trait;
use inference::{EmotionClassifier, EmotionScore, Error, PolarityScores, SentimentScorer};

/// Returns the same polarity for every text.
pub struct FixedScorer {
    pub scores: PolarityScores,
}

impl FixedScorer {
    pub fn with_compound(compound: f64) -> Self {
        let positive = compound.max(0.0) / 2.0;
        let negative = (-compound).max(0.0) / 2.0;
        Self {
            scores: PolarityScores {
                negative,
                neutral: 1.0 - positive - negative,
                positive,
                compound,
            },
        }
    }
}

impl SentimentScorer for FixedScorer {
    fn polarity_scores(&self, _text: &str) -> Result<PolarityScores, Error> {
        Ok(self.scores)
    }

    fn scorer_id(&self) -> &str {
        "fixed"
    }
}

/// Positive when the text contains "good", negative when it contains "bad",
/// neutral otherwise.
pub struct KeywordScorer;

impl SentimentScorer for KeywordScorer {
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores, Error> {
        let text = text.to_lowercase();
        let scores = if text.contains("good") {
            PolarityScores {
                negative: 0.0,
                neutral: 0.0,
                positive: 1.0,
                compound: 0.4404,
            }
        } else if text.contains("bad") {
            PolarityScores {
                negative: 1.0,
                neutral: 0.0,
                positive: 0.0,
                compound: -0.5423,
            }
        } else {
            PolarityScores {
                negative: 0.0,
                neutral: 1.0,
                positive: 0.0,
                compound: 0.0,
            }
        };
        Ok(scores)
    }

    fn scorer_id(&self) -> &str {
        "keyword"
    }
}

pub struct FailingScorer;

impl SentimentScorer for FailingScorer {
    fn polarity_scores(&self, _text: &str) -> Result<PolarityScores, Error> {
        Err(Error::Provider("lexicon unavailable".to_string()))
    }

    fn scorer_id(&self) -> &str {
        "failing"
    }
}

/// Returns a fixed label set for every text.
pub struct FixedClassifier {
    pub scores: Vec<EmotionScore>,
}

impl FixedClassifier {
    /// Seven-label distribution dominated by joy.
    pub fn joyful() -> Self {
        Self {
            scores: vec![
                EmotionScore::new("anger", 0.004),
                EmotionScore::new("disgust", 0.003),
                EmotionScore::new("fear", 0.002),
                EmotionScore::new("joy", 0.9512),
                EmotionScore::new("neutral", 0.02),
                EmotionScore::new("sadness", 0.0058),
                EmotionScore::new("surprise", 0.014),
            ],
        }
    }
}

#[async_trait]
impl EmotionClassifier for FixedClassifier {
    async fn classify(&self, _text: &str) -> Result<Vec<EmotionScore>, Error> {
        Ok(self.scores.clone())
    }

    fn model_id(&self) -> &str {
        "fixed"
    }
}

pub struct FailingClassifier;

#[async_trait]
impl EmotionClassifier for FailingClassifier {
    async fn classify(&self, _text: &str) -> Result<Vec<EmotionScore>, Error> {
        Err(Error::Timeout("emotion model did not answer".to_string()))
    }

    fn model_id(&self) -> &str {
        "failing"
    }
}
