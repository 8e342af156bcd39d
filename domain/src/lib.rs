//! Text analysis rules: request validation, polarity labelling, emotion
//! degradation and response shaping for single and batch analysis.
//!
//! Model capabilities come from the `inference` crate and are passed in by the
//! caller, so nothing here holds global state.

pub mod analysis;
pub mod batch;
pub mod emotion;
pub mod error;
pub mod sentiment;

#[cfg(any(test, feature = "mock"))]
pub mod test_support;

pub use analysis::{Analysis, Metadata};
pub use batch::{BatchAnalysis, BatchItem};
pub use emotion::{Emotion, EmotionOutcome};
pub use sentiment::{Sentiment, SentimentDetails, SentimentLabel};
