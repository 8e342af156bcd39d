//! Concrete model backends.

pub mod hugging_face;
pub mod local;
pub mod vader;

pub use hugging_face::{ClassifierSettings, HuggingFaceClassifier};
pub use local::{LocalEmotionClassifier, LocalModelSettings};
pub use vader::VaderScorer;
