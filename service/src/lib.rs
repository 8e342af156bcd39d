use config::{Config, EmotionBackend};
use inference::providers::{
    ClassifierSettings, HuggingFaceClassifier, LocalEmotionClassifier, LocalModelSettings,
    VaderScorer,
};
use inference::{EmotionClassifier, SentimentScorer};
use log::{error, info};
use std::sync::Arc;

pub mod config;
pub mod logging;

/// Model handles produced by [`init_models`].
pub struct Models {
    pub sentiment_scorer: Arc<dyn SentimentScorer>,
    /// `None` when the emotion model failed to load at startup.
    pub emotion_classifier: Option<Arc<dyn EmotionClassifier>>,
}

/// Load both models once at process start.
///
/// The lexicon scorer has no failure mode. The emotion classifier gets a
/// single attempt; a failure is logged and recorded as an absent classifier,
/// never retried.
pub async fn init_models(config: &Config) -> Models {
    let sentiment_scorer: Arc<dyn SentimentScorer> = Arc::new(VaderScorer::new());
    info!("Sentiment scorer ready: {}", sentiment_scorer.scorer_id());

    let loaded = match config.emotion_backend {
        EmotionBackend::Local => load_local_classifier(config).await,
        EmotionBackend::Hosted => load_hosted_classifier(config).await,
    };

    let emotion_classifier = match loaded {
        Ok(classifier) => {
            info!(
                "Emotion model loaded ({} backend): {}",
                config.emotion_backend,
                classifier.model_id()
            );
            Some(classifier)
        }
        Err(e) => {
            error!("Failed to load emotion model {}: {e}", config.emotion_model());
            None
        }
    };

    Models {
        sentiment_scorer,
        emotion_classifier,
    }
}

async fn load_local_classifier(
    config: &Config,
) -> Result<Arc<dyn EmotionClassifier>, inference::Error> {
    let settings = LocalModelSettings {
        model: config.emotion_model().to_string(),
        model_dir: config.emotion_model_dir().map(|dir| dir.to_path_buf()),
    };
    let classifier = LocalEmotionClassifier::load(&settings).await?;
    Ok(Arc::new(classifier))
}

async fn load_hosted_classifier(
    config: &Config,
) -> Result<Arc<dyn EmotionClassifier>, inference::Error> {
    let settings = ClassifierSettings {
        inference_url: config.emotion_inference_url().to_string(),
        model: config.emotion_model().to_string(),
        api_token: config.hf_api_token(),
        timeout: config.emotion_timeout(),
    };
    let classifier = HuggingFaceClassifier::load(&settings).await?;
    Ok(Arc::new(classifier))
}

// Service-level context holding the configuration and the shared, read-only
// model handles. Needs to implement Clone to be passed into Router as State.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    sentiment_scorer: Arc<dyn SentimentScorer>,
    emotion_classifier: Option<Arc<dyn EmotionClassifier>>,
}

impl AppState {
    pub fn new(app_config: Config, models: Models) -> Self {
        Self {
            config: app_config,
            sentiment_scorer: models.sentiment_scorer,
            emotion_classifier: models.emotion_classifier,
        }
    }

    pub fn sentiment_scorer(&self) -> &dyn SentimentScorer {
        self.sentiment_scorer.as_ref()
    }

    pub fn emotion_classifier(&self) -> Option<&dyn EmotionClassifier> {
        self.emotion_classifier.as_deref()
    }

    /// Whether the emotion classifier initialized successfully at startup.
    pub fn emotion_model_loaded(&self) -> bool {
        self.emotion_classifier.is_some()
    }
}
