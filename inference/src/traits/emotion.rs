//! Emotion classifier trait.

use crate::types::emotion::EmotionScore;
use crate::Error;
use async_trait::async_trait;

/// Abstraction for a pre-trained transformer emotion classifier.
///
/// Returns a score for every label of the model's closed label set; scores sum
/// to roughly 1. Ordering of the returned entries is unspecified, callers sort.
/// Implementations are shared across requests and must tolerate concurrent calls.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    /// Classify `text` and return one score per emotion label.
    async fn classify(&self, text: &str) -> Result<Vec<EmotionScore>, Error>;

    /// Return the model identifier (e.g., a Hugging Face repository id).
    fn model_id(&self) -> &str;
}
