//! Emotion classification with explicit degradation.

use crate::sentiment::round4;
use inference::{EmotionClassifier, EmotionScore};
use log::*;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use utoipa::ToSchema;

/// Character budget of the text handed to the classifier. A stand-in for the
/// model's token limit, counted in characters.
pub const EMOTION_INPUT_CHARS: usize = 512;

/// Number of emotions kept in a response.
pub const MAX_EMOTIONS: usize = 5;

/// Label of the placeholder entry returned when a classification call fails.
pub const ERROR_LABEL: &str = "error";

#[derive(Debug, Clone, PartialEq, ToSchema)]
pub struct Emotion {
    pub label: String,
    /// Probability rounded to 4 decimals, or the integer `0` on the failure placeholder.
    pub score: f64,
}

impl Emotion {
    fn placeholder() -> Self {
        Emotion {
            label: ERROR_LABEL.to_string(),
            score: 0.0,
        }
    }

    fn is_placeholder(&self) -> bool {
        self.label == ERROR_LABEL && self.score == 0.0
    }
}

// Model scores are always written as floats; the failure placeholder carries
// a bare integer zero.
impl Serialize for Emotion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Emotion", 2)?;
        state.serialize_field("label", &self.label)?;
        if self.is_placeholder() {
            state.serialize_field("score", &0u8)?;
        } else {
            state.serialize_field("score", &self.score)?;
        }
        state.end()
    }
}

/// What happened when emotions were requested for a text.
#[derive(Debug, Clone, PartialEq)]
pub enum EmotionOutcome {
    /// The classifier answered; entries are sorted by descending score and truncated.
    Classified(Vec<Emotion>),
    /// The classifier is loaded but this call failed.
    Degraded,
    /// The classifier never loaded at startup.
    Unavailable,
}

impl EmotionOutcome {
    /// Build a `Classified` outcome from raw model scores.
    pub fn classified(mut scores: Vec<EmotionScore>) -> Self {
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        let emotions = scores
            .into_iter()
            .take(MAX_EMOTIONS)
            .map(|s| Emotion {
                label: s.label,
                score: round4(s.score),
            })
            .collect();

        EmotionOutcome::Classified(emotions)
    }

    /// Flatten to the response shape: the classified list, a single sentinel
    /// entry when degraded, or nothing when unavailable.
    pub fn into_emotions(self) -> Vec<Emotion> {
        match self {
            EmotionOutcome::Classified(emotions) => emotions,
            EmotionOutcome::Degraded => vec![Emotion::placeholder()],
            EmotionOutcome::Unavailable => Vec::new(),
        }
    }
}

/// Classify `text`, truncated to [`EMOTION_INPUT_CHARS`] characters.
///
/// A per-call failure is logged and reported as [`EmotionOutcome::Degraded`];
/// it never fails the enclosing request.
pub async fn classify(classifier: Option<&dyn EmotionClassifier>, text: &str) -> EmotionOutcome {
    let Some(classifier) = classifier else {
        return EmotionOutcome::Unavailable;
    };

    match classifier.classify(truncate_chars(text, EMOTION_INPUT_CHARS)).await {
        Ok(scores) => EmotionOutcome::classified(scores),
        Err(e) => {
            error!("Emotion analysis failed: {e}");
            EmotionOutcome::Degraded
        }
    }
}

/// Longest prefix of `text` holding at most `max_chars` characters.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingClassifier {
        seen: Mutex<Vec<String>>,
        reply: Result<Vec<EmotionScore>, &'static str>,
    }

    #[async_trait]
    impl EmotionClassifier for RecordingClassifier {
        async fn classify(&self, text: &str) -> Result<Vec<EmotionScore>, inference::Error> {
            self.seen.lock().unwrap().push(text.to_string());
            self.reply
                .clone()
                .map_err(|msg| inference::Error::Provider(msg.to_string()))
        }

        fn model_id(&self) -> &str {
            "recording"
        }
    }

    fn seven_labels() -> Vec<EmotionScore> {
        vec![
            EmotionScore::new("neutral", 0.05),
            EmotionScore::new("joy", 0.612_345),
            EmotionScore::new("anger", 0.01),
            EmotionScore::new("surprise", 0.2),
            EmotionScore::new("sadness", 0.04),
            EmotionScore::new("fear", 0.03),
            EmotionScore::new("disgust", 0.057_655),
        ]
    }

    #[test]
    fn test_classified_sorts_descending_and_keeps_top_five() {
        let EmotionOutcome::Classified(emotions) = EmotionOutcome::classified(seven_labels())
        else {
            panic!("expected classified outcome");
        };

        let labels: Vec<&str> = emotions.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["joy", "surprise", "disgust", "neutral", "sadness"]);
        assert_eq!(emotions[0].score, 0.6123);
        assert!(emotions.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_into_emotions_shapes() {
        assert_eq!(
            EmotionOutcome::Degraded.into_emotions(),
            vec![Emotion {
                label: "error".to_string(),
                score: 0.0
            }]
        );
        assert!(EmotionOutcome::Unavailable.into_emotions().is_empty());
    }

    #[test]
    fn test_placeholder_score_serializes_as_integer_zero() {
        let degraded = serde_json::to_value(EmotionOutcome::Degraded.into_emotions()).unwrap();
        assert_eq!(degraded, serde_json::json!([{ "label": "error", "score": 0 }]));
        assert!(degraded[0]["score"].is_u64());

        let classified = serde_json::to_value(Emotion {
            label: "joy".to_string(),
            score: 0.0,
        })
        .unwrap();
        assert!(classified["score"].is_f64());
    }

    #[tokio::test]
    async fn test_classify_without_classifier_is_unavailable() {
        assert_eq!(classify(None, "hello").await, EmotionOutcome::Unavailable);
    }

    #[tokio::test]
    async fn test_classify_failure_degrades() {
        let classifier = RecordingClassifier {
            seen: Mutex::new(Vec::new()),
            reply: Err("model crashed"),
        };

        assert_eq!(
            classify(Some(&classifier), "hello").await,
            EmotionOutcome::Degraded
        );
    }

    #[tokio::test]
    async fn test_classify_truncates_input_to_512_chars() {
        let classifier = RecordingClassifier {
            seen: Mutex::new(Vec::new()),
            reply: Ok(seven_labels()),
        };
        let text = "é".repeat(600);

        classify(Some(&classifier), &text).await;

        let seen = classifier.seen.lock().unwrap();
        assert_eq!(seen[0].chars().count(), EMOTION_INPUT_CHARS);
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 5), "hi");
        assert_eq!(truncate_chars("", 3), "");
    }
}
