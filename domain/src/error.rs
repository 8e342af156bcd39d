//! Error types for the `domain` layer.
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors are modeled as a `source` holding the original error (if any) and an
/// `error_kind` tree describing what went wrong. Lower layers (`inference`) are
/// translated into this type so that `web` only ever matches on domain kinds
/// when choosing an HTTP status code and message.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    /// The caller sent a request that breaks a validation rule. Recoverable by the caller.
    Validation(ValidationErrorKind),
    Internal(InternalErrorKind),
}

/// Every validation rule an analysis request can break.
#[derive(Debug, PartialEq)]
pub enum ValidationErrorKind {
    /// No body, or a body that is not a JSON object.
    MalformedBody,
    MissingField(&'static str),
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    EmptyText,
    TextTooLong { max: usize },
    TooManyTexts { max: usize },
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    /// A model capability failed while serving a request.
    Inference(String),
}

impl Error {
    pub fn validation(kind: ValidationErrorKind) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Validation(kind),
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationErrorKind::MalformedBody => {
                write!(f, "The request body must be a JSON object")
            }
            ValidationErrorKind::MissingField(field) => {
                write!(f, "The \"{field}\" field is required")
            }
            ValidationErrorKind::WrongType { field, expected } => {
                write!(f, "\"{field}\" must be {expected}")
            }
            ValidationErrorKind::EmptyText => write!(f, "The text cannot be empty"),
            ValidationErrorKind::TextTooLong { max } => {
                write!(f, "The text is too long (max {max} characters)")
            }
            ValidationErrorKind::TooManyTexts { max } => {
                write!(f, "Maximum {max} texts per request")
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            DomainErrorKind::Validation(kind) => write!(f, "{kind}"),
            DomainErrorKind::Internal(InternalErrorKind::Inference(msg)) => {
                write!(f, "Inference failed: {msg}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `inference` layer to the `domain` layer.
impl From<inference::Error> for Error {
    fn from(err: inference::Error) -> Self {
        let message = err.to_string();
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Inference(message)),
        }
    }
}
