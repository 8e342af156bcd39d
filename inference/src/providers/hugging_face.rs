//! Hugging Face hosted text-classification client.

use crate::types::emotion::EmotionScore;
use crate::{EmotionClassifier, Error};
use async_trait::async_trait;
use log::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

/// Text used for the one-off warm-up call made by [`HuggingFaceClassifier::load`].
const WARM_UP_TEXT: &str = "Warming up the emotion model.";

/// Settings needed to reach a hosted text-classification model.
#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    /// Base URL of the inference API; the model id is appended as a path segment.
    pub inference_url: String,
    /// Hugging Face repository id of the model.
    pub model: String,
    /// Optional bearer token.
    pub api_token: Option<String>,
    pub timeout: Duration,
}

/// [`EmotionClassifier`] that calls a Hugging Face text-classification endpoint.
pub struct HuggingFaceClassifier {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

/// Body sent to the inference endpoint. `top_k: null` asks for every label.
#[derive(Debug, Serialize)]
struct ClassificationRequest<'a> {
    inputs: &'a str,
    parameters: serde_json::Value,
    options: serde_json::Value,
}

/// The endpoint nests results per input for batched calls and returns a flat
/// list for some single-input deployments.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Nested(Vec<Vec<EmotionScore>>),
    Flat(Vec<EmotionScore>),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl HuggingFaceClassifier {
    /// Build the client without contacting the endpoint.
    pub fn new(settings: &ClassifierSettings) -> Result<Self, Error> {
        let client = build_client(settings)?;
        let endpoint = format!(
            "{}/{}",
            settings.inference_url.trim_end_matches('/'),
            settings.model
        );

        Ok(Self {
            client,
            endpoint,
            model: settings.model.clone(),
        })
    }

    /// Build the client and run one warm-up classification, so that a model
    /// that can't be reached is detected at startup rather than per request.
    pub async fn load(settings: &ClassifierSettings) -> Result<Self, Error> {
        let classifier = Self::new(settings)?;

        info!("Loading emotion model {} from {}", classifier.model, classifier.endpoint);
        let labels = classifier.classify(WARM_UP_TEXT).await?;
        if labels.is_empty() {
            return Err(Error::Provider(format!(
                "model {} returned no emotion labels",
                classifier.model
            )));
        }
        debug!("Emotion model answered with {} labels", labels.len());

        Ok(classifier)
    }
}

#[async_trait]
impl EmotionClassifier for HuggingFaceClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<EmotionScore>, Error> {
        let request = ClassificationRequest {
            inputs: text,
            parameters: json!({ "top_k": null }),
            options: json!({ "wait_for_model": true }),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to send emotion classification request: {e:?}");
                Error::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            warn!("Emotion model replied {status}: {message}");
            return Err(Error::Provider(format!("{status}: {message}")));
        }

        let scores = match response.json::<ClassificationResponse>().await? {
            ClassificationResponse::Nested(mut per_input) => {
                if per_input.is_empty() {
                    Vec::new()
                } else {
                    per_input.swap_remove(0)
                }
            }
            ClassificationResponse::Flat(scores) => scores,
        };

        Ok(scores)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Build an HTTP client with the optional bearer token and request timeout.
fn build_client(settings: &ClassifierSettings) -> Result<reqwest::Client, Error> {
    let mut headers = reqwest::header::HeaderMap::new();

    if let Some(token) = settings.api_token.as_deref() {
        let mut auth_header =
            reqwest::header::HeaderValue::from_str(&format!("Bearer {token}")).map_err(|err| {
                warn!("Failed to create authorization header value: {err:?}");
                Error::Configuration("invalid Hugging Face API token".to_string())
            })?;
        auth_header.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth_header);
    }

    Ok(reqwest::Client::builder()
        .use_rustls_tls()
        .default_headers(headers)
        .timeout(settings.timeout)
        .build()?)
}
