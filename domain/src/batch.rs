//! Batch analysis: sentiment only, blank items skipped.

use crate::emotion::truncate_chars;
use crate::error::{Error, ValidationErrorKind};
use crate::sentiment::{self, SentimentLabel};
use inference::SentimentScorer;
use log::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Maximum number of texts accepted in one batch.
pub const MAX_BATCH_TEXTS: usize = 50;

/// Characters of each text echoed back in a batch result.
pub const BATCH_PREVIEW_CHARS: usize = 100;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BatchItem {
    /// Position of the text in the submitted list.
    pub index: usize,
    /// The submitted text, cut to 100 characters plus "..." when longer.
    pub text: String,
    pub sentiment: SentimentLabel,
    /// Absolute compound score rounded to 4 decimals.
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BatchAnalysis {
    pub results: Vec<BatchItem>,
    /// Number of processed (non-blank) texts.
    pub total: usize,
}

/// Check a submitted batch: present and at most [`MAX_BATCH_TEXTS`] entries.
pub fn validate_batch<T>(texts: Option<&[T]>) -> Result<&[T], Error> {
    let texts = texts.ok_or_else(|| Error::validation(ValidationErrorKind::MissingField("texts")))?;

    if texts.len() > MAX_BATCH_TEXTS {
        return Err(Error::validation(ValidationErrorKind::TooManyTexts {
            max: MAX_BATCH_TEXTS,
        }));
    }

    Ok(texts)
}

/// Score every non-blank text. `None` entries count as blank.
///
/// Results keep the original position in `index`, so skipped entries leave
/// gaps in the index values while the result list itself stays dense.
pub fn analyze_batch<S: AsRef<str>>(
    scorer: &dyn SentimentScorer,
    texts: &[Option<S>],
) -> Result<BatchAnalysis, Error> {
    info!("Batch analysis of {} texts", texts.len());

    let mut results = Vec::with_capacity(texts.len());
    for (index, text) in texts.iter().enumerate() {
        let text: Option<&str> = text.as_ref().map(|t| t.as_ref());
        let Some(text) = text else {
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }

        let sentiment = sentiment::score(scorer, text)?;
        results.push(BatchItem {
            index,
            text: preview(text),
            sentiment: sentiment.label,
            score: sentiment.score,
        });
    }

    debug!("Batch analysis processed {} of {} texts", results.len(), texts.len());

    Ok(BatchAnalysis {
        total: results.len(),
        results,
    })
}

fn preview(text: &str) -> String {
    let head = truncate_chars(text, BATCH_PREVIEW_CHARS);
    if head.len() < text.len() {
        format!("{head}{ELLIPSIS}")
    } else {
        text.to_string()
    }
}
