//! Inference capability layer for sentiment and emotion models.
//!
//! This crate provides trait-based abstractions over the two pre-built models
//! the analysis service delegates to:
//! - A lexicon-based polarity scorer (negative / neutral / positive / compound)
//! - A transformer emotion classifier (closed label set with confidence scores)
//!
//! The design is provider-agnostic: the service holds `Arc<dyn ...>` handles, so
//! providers can be swapped (or faked in tests) without touching request handling.

pub mod error;
pub mod providers;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::Error;
pub use traits::emotion::EmotionClassifier;
pub use traits::sentiment::SentimentScorer;
pub use types::emotion::EmotionScore;
pub use types::polarity::PolarityScores;
