//! Error types for inference operations.

use std::fmt;

/// Universal error type that abstracts provider-specific errors into common variants.
///
/// All provider implementations map their native errors to these variants,
/// so callers never need to know which model backend produced the failure.
#[derive(Debug)]
pub enum Error {
    /// Connectivity issues, DNS failures or refused connections while reaching
    /// a hosted model.
    Network(String),

    /// The model did not answer within the configured timeout.
    Timeout(String),

    /// Invalid parameters or malformed provider settings (bad header values,
    /// client construction failures).
    Configuration(String),

    /// The provider answered but reported a failure (model loading, rate limit,
    /// unknown model id).
    Provider(String),

    /// The provider reply could not be decoded into the expected shape.
    Deserialization(String),

    /// An in-process model failed to build, tokenize or run a forward pass.
    Model(String),

    /// Catch-all for errors that don't fit other categories.
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::Timeout(msg) => write!(f, "Timeout: {}", msg),
            Error::Configuration(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::Provider(msg) => write!(f, "Provider error: {}", msg),
            Error::Deserialization(msg) => write!(f, "Deserialization error: {}", msg),
            Error::Model(msg) => write!(f, "Model error: {}", msg),
            Error::Other(err) => write!(f, "Other error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(err.to_string())
        } else if err.is_builder() {
            Error::Configuration(err.to_string())
        } else if err.is_decode() {
            Error::Deserialization(err.to_string())
        } else if err.is_connect() || err.is_request() {
            Error::Network(err.to_string())
        } else {
            Error::Other(Box::new(err))
        }
    }
}

impl From<candle_core::Error> for Error {
    fn from(err: candle_core::Error) -> Self {
        Error::Model(err.to_string())
    }
}
