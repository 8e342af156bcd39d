use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Hugging Face repository id of the emotion classifier used when `EMOTION_MODEL` is not set.
pub const DEFAULT_EMOTION_MODEL: &str = "j-hartmann/emotion-english-distilroberta-base";

/// Hosted inference API base URL used when `EMOTION_INFERENCE_URL` is not set.
pub const DEFAULT_EMOTION_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";

/// Origin value that allows requests from any origin.
pub const ANY_ORIGIN: &str = "*";

/// Where the emotion classifier runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EmotionBackend {
    /// Weights loaded into this process at startup; no network during requests.
    Local,
    /// Every classification is a call to a hosted inference API.
    Hosted,
}

#[derive(Debug, PartialEq, Eq)]
pub struct EmotionBackendParseError;

impl FromStr for EmotionBackend {
    type Err = EmotionBackendParseError;
    fn from_str(backend: &str) -> Result<EmotionBackend, Self::Err> {
        match backend.to_lowercase().as_str() {
            "local" => Ok(EmotionBackend::Local),
            "hosted" => Ok(EmotionBackend::Hosted),
            _ => Err(EmotionBackendParseError),
        }
    }
}

impl fmt::Display for EmotionBackend {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EmotionBackend::Local => write!(f, "local"),
            EmotionBackend::Hosted => write!(f, "hosted"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that are allowed to receive server responses.
    /// Use `*` to allow any origin.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = ANY_ORIGIN
    )]
    pub allowed_origins: Vec<String>,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "0.0.0.0")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 8000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Run the emotion classifier in this process (`local`) or call a hosted inference API (`hosted`).
    #[arg(
        long,
        env,
        default_value_t = EmotionBackend::Local,
        value_parser = clap::builder::PossibleValuesParser::new(["LOCAL", "HOSTED", "local", "hosted"])
            .map(|s| s.parse::<EmotionBackend>().unwrap()),
        )]
    pub emotion_backend: EmotionBackend,

    /// The Hugging Face repository id of the emotion classification model.
    #[arg(long, env, default_value = DEFAULT_EMOTION_MODEL)]
    emotion_model: String,

    /// A directory holding the model's config.json, tokenizer.json and weights.
    /// When unset, the local backend fetches them through the Hugging Face Hub cache.
    #[arg(long, env)]
    emotion_model_dir: Option<PathBuf>,

    /// The base URL of the text-classification inference API (hosted backend only).
    #[arg(long, env, default_value = DEFAULT_EMOTION_INFERENCE_URL)]
    emotion_inference_url: String,

    /// The bearer token to use when calling the inference API (hosted backend only).
    #[arg(long, env)]
    hf_api_token: Option<String>,

    /// Timeout in seconds for a single hosted emotion classification call
    #[arg(long, env, default_value_t = 30)]
    pub emotion_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn interface(&self) -> &str {
        self.interface.as_deref().unwrap_or("0.0.0.0")
    }

    /// Returns true when the allowed origins contain the `*` wildcard.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins
            .iter()
            .any(|origin| origin.trim() == ANY_ORIGIN)
    }

    pub fn emotion_model(&self) -> &str {
        &self.emotion_model
    }

    pub fn emotion_model_dir(&self) -> Option<&Path> {
        self.emotion_model_dir.as_deref()
    }

    pub fn emotion_inference_url(&self) -> &str {
        &self.emotion_inference_url
    }

    pub fn hf_api_token(&self) -> Option<String> {
        self.hf_api_token.clone()
    }

    pub fn emotion_timeout(&self) -> Duration {
        Duration::from_secs(self.emotion_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_bind_all_interfaces_on_port_8000() {
        let config = Config::try_parse_from(["ai_service"]).unwrap();

        assert_eq!(config.interface(), "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert!(config.allows_any_origin());
        assert_eq!(config.emotion_backend, EmotionBackend::Local);
        assert_eq!(config.emotion_model(), DEFAULT_EMOTION_MODEL);
        assert!(config.emotion_model_dir().is_none());
        assert_eq!(config.emotion_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = Config::try_parse_from([
            "ai_service",
            "--port",
            "9100",
            "--allowed-origins",
            "http://localhost:3000,https://app.example.com",
            "--log-level-filter",
            "DEBUG",
            "--emotion-timeout-secs",
            "5",
        ])
        .unwrap();

        assert_eq!(config.port, 9100);
        assert!(!config.allows_any_origin());
        assert_eq!(config.allowed_origins.len(), 2);
        assert_eq!(config.log_level_filter, LevelFilter::Debug);
        assert_eq!(config.emotion_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        assert!(Config::try_parse_from(["ai_service", "--log-level-filter", "LOUD"]).is_err());
    }

    #[test]
    fn test_hosted_backend_flags() {
        let config = Config::try_parse_from([
            "ai_service",
            "--emotion-backend",
            "HOSTED",
            "--emotion-inference-url",
            "http://127.0.0.1:1234",
        ])
        .unwrap();

        assert_eq!(config.emotion_backend, EmotionBackend::Hosted);
        assert_eq!(config.emotion_inference_url(), "http://127.0.0.1:1234");
    }

    #[test]
    fn test_local_model_dir_and_unknown_backend() {
        let config =
            Config::try_parse_from(["ai_service", "--emotion-model-dir", "/models/emotion"]).unwrap();
        assert_eq!(config.emotion_model_dir(), Some(Path::new("/models/emotion")));

        assert!(Config::try_parse_from(["ai_service", "--emotion-backend", "remote"]).is_err());
    }
}
