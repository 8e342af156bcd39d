//! In-process emotion classifier: a RoBERTa sequence-classification model run
//! on the CPU with candle.
//!
//! Weights, tokenizer and label map are resolved once, either from a local
//! directory or from the Hugging Face Hub cache, and the model is built at load
//! time. Classification never touches the network.

use crate::types::emotion::EmotionScore;
use crate::{EmotionClassifier, Error};
use async_trait::async_trait;
use candle_core::{DType, Device, Tensor, D};
use candle_nn::{ops::softmax, VarBuilder};
use candle_transformers::models::xlm_roberta::{Config, XLMRobertaForSequenceClassification};
use log::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokenizers::{Tokenizer, TruncationParams};

/// Longest token sequence the model accepts, special tokens included.
const MAX_SEQUENCE_TOKENS: usize = 512;

const CONFIG_FILE: &str = "config.json";
const TOKENIZER_FILE: &str = "tokenizer.json";
const SAFETENSORS_FILE: &str = "model.safetensors";
const PYTORCH_FILE: &str = "pytorch_model.bin";

/// Where to find the classifier.
#[derive(Debug, Clone)]
pub struct LocalModelSettings {
    /// Hugging Face repository id, e.g. `j-hartmann/emotion-english-distilroberta-base`.
    pub model: String,
    /// Directory already holding `config.json`, `tokenizer.json` and the weights.
    /// When set, nothing is downloaded.
    pub model_dir: Option<PathBuf>,
}

#[derive(Debug)]
struct ModelFiles {
    config: PathBuf,
    tokenizer: PathBuf,
    weights: PathBuf,
}

#[derive(Deserialize)]
struct LabelConfig {
    #[serde(default)]
    id2label: HashMap<String, String>,
}

struct LoadedModel {
    model: XLMRobertaForSequenceClassification,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    device: Device,
}

/// [`EmotionClassifier`] running the model in this process.
///
/// Forward passes are CPU bound, so each call runs on tokio's blocking pool.
pub struct LocalEmotionClassifier {
    model_id: String,
    inner: Arc<LoadedModel>,
}

impl LocalEmotionClassifier {
    /// Resolve the model files and build the network. Downloads go through the
    /// Hub cache, so only the first start on a machine fetches anything.
    pub async fn load(settings: &LocalModelSettings) -> Result<Self, Error> {
        let files = match &settings.model_dir {
            Some(dir) => files_in_dir(dir)?,
            None => download_files(&settings.model).await?,
        };
        debug!("Emotion model files: {files:?}");

        let inner = tokio::task::spawn_blocking(move || LoadedModel::build(&files))
            .await
            .map_err(|e| Error::Other(Box::new(e)))??;

        info!(
            "Built {} with {} labels: {}",
            settings.model,
            inner.labels.len(),
            inner.labels.join(", ")
        );

        Ok(Self {
            model_id: settings.model.clone(),
            inner: Arc::new(inner),
        })
    }
}

#[async_trait]
impl EmotionClassifier for LocalEmotionClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<EmotionScore>, Error> {
        let inner = Arc::clone(&self.inner);
        let text = text.to_string();

        tokio::task::spawn_blocking(move || inner.classify(&text))
            .await
            .map_err(|e| Error::Other(Box::new(e)))?
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

impl LoadedModel {
    fn build(files: &ModelFiles) -> Result<Self, Error> {
        let raw_config = std::fs::read_to_string(&files.config)
            .map_err(|e| Error::Configuration(format!("{}: {e}", files.config.display())))?;
        let config: Config = serde_json::from_str(&raw_config)
            .map_err(|e| Error::Deserialization(format!("model config: {e}")))?;
        let label_config: LabelConfig = serde_json::from_str(&raw_config)
            .map_err(|e| Error::Deserialization(format!("model labels: {e}")))?;
        let labels = ordered_labels(label_config.id2label)?;

        let device = Device::Cpu;
        let vb = if files.weights.extension().is_some_and(|ext| ext == "safetensors") {
            // The file stays mapped for the lifetime of the model and is never
            // written through this process.
            unsafe { VarBuilder::from_mmaped_safetensors(&[&files.weights], DType::F32, &device)? }
        } else {
            VarBuilder::from_pth(&files.weights, DType::F32, &device)?
        };
        let model = XLMRobertaForSequenceClassification::new(labels.len(), &config, vb)?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| Error::Model(format!("Failed to load tokenizer: {e}")))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| Error::Model(format!("Failed to configure tokenizer: {e}")))?;

        Ok(Self {
            model,
            tokenizer,
            labels,
            device,
        })
    }

    fn classify(&self, text: &str) -> Result<Vec<EmotionScore>, Error> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| Error::Model(format!("Tokenization failed: {e}")))?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;

        let logits = self
            .model
            .forward(&input_ids, &attention_mask, &token_type_ids)?;
        let probabilities = softmax(&logits, D::Minus1)?.squeeze(0)?.to_vec1::<f32>()?;

        label_scores(&self.labels, &probabilities)
    }
}

fn files_in_dir(dir: &Path) -> Result<ModelFiles, Error> {
    let existing = |name: &str| {
        let path = dir.join(name);
        path.is_file().then_some(path)
    };
    let missing = |name: &str| Error::Configuration(format!("{name} not found in {}", dir.display()));

    Ok(ModelFiles {
        config: existing(CONFIG_FILE).ok_or_else(|| missing(CONFIG_FILE))?,
        tokenizer: existing(TOKENIZER_FILE).ok_or_else(|| missing(TOKENIZER_FILE))?,
        weights: existing(SAFETENSORS_FILE)
            .or_else(|| existing(PYTORCH_FILE))
            .ok_or_else(|| missing(SAFETENSORS_FILE))?,
    })
}

async fn download_files(model: &str) -> Result<ModelFiles, Error> {
    let api = hf_hub::api::tokio::ApiBuilder::new()
        .build()
        .map_err(|e| Error::Configuration(format!("Hugging Face Hub client: {e}")))?;
    let repo = api.model(model.to_string());
    let download = |e: hf_hub::api::tokio::ApiError| Error::Network(format!("{model}: {e}"));

    let config = repo.get(CONFIG_FILE).await.map_err(download)?;
    let tokenizer = repo.get(TOKENIZER_FILE).await.map_err(download)?;
    let weights = match repo.get(SAFETENSORS_FILE).await {
        Ok(path) => path,
        Err(_) => repo.get(PYTORCH_FILE).await.map_err(download)?,
    };

    Ok(ModelFiles {
        config,
        tokenizer,
        weights,
    })
}

/// Labels ordered by class index. Indices must cover `0..n` with no gaps.
fn ordered_labels(id2label: HashMap<String, String>) -> Result<Vec<String>, Error> {
    if id2label.is_empty() {
        return Err(Error::Configuration("model config has no id2label map".to_string()));
    }

    let mut indexed = id2label
        .into_iter()
        .map(|(id, label)| {
            id.parse::<usize>()
                .map(|id| (id, label))
                .map_err(|_| Error::Configuration(format!("non-numeric label id {id:?}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    indexed.sort_by_key(|(id, _)| *id);

    if indexed.iter().enumerate().any(|(position, (id, _))| position != *id) {
        return Err(Error::Configuration("label ids are not contiguous from 0".to_string()));
    }

    Ok(indexed.into_iter().map(|(_, label)| label).collect())
}

fn label_scores(labels: &[String], probabilities: &[f32]) -> Result<Vec<EmotionScore>, Error> {
    if labels.len() != probabilities.len() {
        return Err(Error::Model(format!(
            "model produced {} scores for {} labels",
            probabilities.len(),
            labels.len()
        )));
    }

    Ok(labels
        .iter()
        .zip(probabilities)
        .map(|(label, probability)| EmotionScore::new(label.clone(), f64::from(*probability)))
        .collect())
}
