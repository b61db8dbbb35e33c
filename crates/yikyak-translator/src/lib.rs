mod client;

pub use client::LibreTranslateClient;

use yikyak_types::{Detection, Language, Translation, TranslationRequest};

/// Remote translation API used by the session.
///
/// Every method is a single request/response round trip. Implementations
/// do not cache or retry.
#[async_trait::async_trait]
pub trait TranslationApi: Send + Sync {
    /// Fetch every language the backend can translate to or from
    async fn fetch_languages(&self) -> Result<Vec<Language>, TranslateError>;

    /// Detect the language of `text`, ranked by confidence, highest first
    async fn detect(&self, text: &str, api_key: &str) -> Result<Vec<Detection>, TranslateError>;

    /// Translate according to `request`
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
    pub free_tier_available: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}
