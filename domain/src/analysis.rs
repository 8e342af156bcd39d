//! Single-text analysis: validation, sentiment scoring, emotion classification.

use crate::emotion::{self, Emotion};
use crate::error::{Error, ValidationErrorKind};
use crate::sentiment::{self, Sentiment};
use inference::{EmotionClassifier, SentimentScorer};
use log::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Maximum length of an analyzed text, in characters, after trimming.
pub const MAX_TEXT_CHARS: usize = 5000;

/// Model description reported in every analysis response.
pub const MODEL_DESCRIPTION: &str = "VADER + DistilRoBERTa";

/// Number of characters of the text shown in log lines.
const LOG_PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Metadata {
    /// Length of the analyzed (trimmed) text in characters.
    pub text_length: usize,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Analysis {
    pub text: String,
    pub sentiment: Sentiment,
    /// Up to five emotions, highest score first.
    pub emotions: Vec<Emotion>,
    pub metadata: Metadata,
}

/// Check a submitted text and return it trimmed.
///
/// Rules apply in order and the first failure wins: present, non-empty after
/// trimming, at most [`MAX_TEXT_CHARS`] characters.
pub fn validate_text(text: Option<&str>) -> Result<&str, Error> {
    let text = text
        .ok_or_else(|| Error::validation(ValidationErrorKind::MissingField("text")))?
        .trim();

    if text.is_empty() {
        return Err(Error::validation(ValidationErrorKind::EmptyText));
    }

    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(Error::validation(ValidationErrorKind::TextTooLong {
            max: MAX_TEXT_CHARS,
        }));
    }

    Ok(text)
}

/// Analyze an already validated text.
///
/// Sentiment runs on the full text. Emotions run on a truncated prefix and
/// degrade instead of failing; only a sentiment scorer failure is an error.
pub async fn analyze(
    scorer: &dyn SentimentScorer,
    classifier: Option<&dyn EmotionClassifier>,
    text: &str,
) -> Result<Analysis, Error> {
    info!(
        "Analyzing text: {}...",
        emotion::truncate_chars(text, LOG_PREVIEW_CHARS)
    );

    let sentiment = sentiment::score(scorer, text)?;
    let emotions = emotion::classify(classifier, text).await.into_emotions();

    info!("Analysis complete: {}", sentiment.label);

    Ok(Analysis {
        text: text.to_string(),
        sentiment,
        emotions,
        metadata: Metadata {
            text_length: text.chars().count(),
            model: MODEL_DESCRIPTION.to_string(),
        },
    })
}
