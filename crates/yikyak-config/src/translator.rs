use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    // Public mirror, no api key needed
    "https://libretranslate.de".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Sent as `api_key` on every request, empty for public mirrors
    #[serde(default)]
    pub api_key: String,
    /// Per-request timeout, `None` keeps the transport default
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl TranslatorConfig {
    pub fn new() -> Self {
        let api_url = env::var("TRANSLATE_API_URL").unwrap_or_else(|_| default_api_url());
        let api_key = env::var("TRANSLATE_API_KEY").unwrap_or_default();
        let timeout_seconds = env::var("TRANSLATE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok());

        Self {
            api_url,
            api_key,
            timeout_seconds,
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
            timeout_seconds: None,
        }
    }
}
