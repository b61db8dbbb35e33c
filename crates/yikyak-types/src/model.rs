use serde::{Deserialize, Serialize};

pub type LanguageCode = String;

/// Only plain text is ever sent to the translate endpoint.
pub const DEFAULT_FORMAT: &str = "text";

/// Language descriptor as returned by `GET /languages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: LanguageCode,
    pub name: String,
}

/// Body of `POST /translate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    #[serde(rename = "q")]
    pub text: String,
    pub source: LanguageCode,
    pub target: LanguageCode,
    pub format: String,
    pub api_key: String,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source: impl Into<LanguageCode>,
        target: impl Into<LanguageCode>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            target: target.into(),
            format: DEFAULT_FORMAT.to_string(),
            api_key: api_key.into(),
        }
    }
}

/// Response of `POST /translate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

/// Body of `POST /detect`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionRequest {
    #[serde(rename = "q")]
    pub text: String,
    pub api_key: String,
}

impl DetectionRequest {
    pub fn new(text: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            api_key: api_key.into(),
        }
    }
}

/// One candidate of the ranked `POST /detect` response.
///
/// Servers send `confidence` as an integer or a decimal (`90.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub confidence: f64,
    pub language: LanguageCode,
}
