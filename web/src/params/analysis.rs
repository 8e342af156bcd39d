use domain::error::{Error, ValidationErrorKind};
use serde::de::IgnoredAny;
use serde::Deserialize;
use utoipa::ToSchema;

/// A JSON value that should be a string. Anything else is accepted without
/// being buffered so that the type mismatch can be reported as a validation
/// error instead of a parse failure.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TextField {
    Text(String),
    Other(IgnoredAny),
}

impl TextField {
    fn as_text(&self, field: &'static str, expected: &'static str) -> Result<&str, Error> {
        match self {
            TextField::Text(text) => Ok(text.as_str()),
            TextField::Other(_) => Err(Error::validation(ValidationErrorKind::WrongType {
                field,
                expected,
            })),
        }
    }
}

/// A JSON value that should be a list. Entries are typed one by one so the
/// list length can be checked before any entry's type.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TextListField {
    Texts(Vec<Option<TextField>>),
    Other(IgnoredAny),
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct AnalyzeParams {
    /// Text to analyze, 1 to 5000 characters after trimming.
    #[serde(default)]
    #[schema(value_type = String, example = "I love this!")]
    pub(crate) text: Option<TextField>,
}

impl AnalyzeParams {
    /// The submitted text, `None` when the field is missing or `null`.
    pub(crate) fn text(&self) -> Result<Option<&str>, Error> {
        self.text
            .as_ref()
            .map(|text| text.as_text("text", "a string"))
            .transpose()
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct BatchAnalyzeParams {
    /// Up to 50 texts; blank entries are skipped.
    #[serde(default)]
    #[schema(value_type = Vec<String>, example = json!(["good", "bad", "   "]))]
    pub(crate) texts: Option<TextListField>,
}

impl BatchAnalyzeParams {
    /// The submitted list, `None` when the field is missing or `null`.
    /// Entries are left untyped; see [`BatchAnalyzeParams::entry_texts`].
    pub(crate) fn texts(&self) -> Result<Option<&[Option<TextField>]>, Error> {
        match &self.texts {
            None => Ok(None),
            Some(TextListField::Texts(texts)) => Ok(Some(texts.as_slice())),
            Some(TextListField::Other(_)) => Err(not_a_list_of_strings()),
        }
    }

    /// Read every entry as an optional string, failing on the first entry that
    /// is neither a string nor `null`.
    pub(crate) fn entry_texts(entries: &[Option<TextField>]) -> Result<Vec<Option<&str>>, Error> {
        entries
            .iter()
            .map(|entry| {
                entry
                    .as_ref()
                    .map(|text| text.as_text("texts", "a list of strings"))
                    .transpose()
            })
            .collect()
    }
}

fn not_a_list_of_strings() -> Error {
    Error::validation(ValidationErrorKind::WrongType {
        field: "texts",
        expected: "a list of strings",
    })
}
