use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use yikyak_config::translator::TranslatorConfig;
use yikyak_types::{Detection, DetectionRequest, Language, Translation, TranslationRequest};

use crate::{ProviderMetadata, TranslateError, TranslationApi};

/// Client for a LibreTranslate compatible server
#[derive(Clone)]
pub struct LibreTranslateClient {
    client: reqwest::Client,
    base_url: String,
}

impl LibreTranslateClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Build the client once from config; the same connection pool is reused
    /// for every request afterwards.
    pub fn from_config(config: &TranslatorConfig) -> Result<Self, TranslateError> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self::with_client(builder.build()?, config.api_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// LibreTranslate error body, e.g. `{"error": "Invalid request"}`
#[derive(Deserialize)]
struct ApiErrorBody {
    error: String,
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TranslateError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(TranslateError::RateLimitExceeded);
    }

    if status == StatusCode::FORBIDDEN {
        return Err(TranslateError::AuthenticationError);
    }

    if !status.is_success() {
        let detail = response.json::<ApiErrorBody>().await.ok();
        let message = match detail {
            Some(body) => format!("HTTP {}: {}", status, body.error),
            None => format!("HTTP {}", status),
        };
        return Err(TranslateError::ApiError(message));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| TranslateError::ApiError(format!("Failed to parse response: {}", e)))
}

#[async_trait]
impl TranslationApi for LibreTranslateClient {
    async fn fetch_languages(&self) -> Result<Vec<Language>, TranslateError> {
        tracing::debug!("GET {}/languages", self.base_url);

        let response = self.client.get(self.endpoint("/languages")).send().await?;
        let languages: Vec<Language> = decode(response).await?;

        tracing::debug!("Fetched {} languages", languages.len());
        Ok(languages)
    }

    async fn detect(&self, text: &str, api_key: &str) -> Result<Vec<Detection>, TranslateError> {
        tracing::debug!("POST {}/detect ({} chars)", self.base_url, text.len());

        let request = DetectionRequest::new(text, api_key);
        let response = self
            .client
            .post(self.endpoint("/detect"))
            .json(&request)
            .send()
            .await?;

        decode(response).await
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError> {
        tracing::debug!(
            "POST {}/translate {} -> {} ({} chars)",
            self.base_url,
            request.source,
            request.target,
            request.text.len()
        );

        let response = self
            .client
            .post(self.endpoint("/translate"))
            .json(request)
            .send()
            .await?;

        decode(response).await
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "LibreTranslate".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}
