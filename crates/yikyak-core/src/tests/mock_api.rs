use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use yikyak_translator::{ProviderMetadata, TranslateError, TranslationApi};
use yikyak_types::{Detection, Language, Translation, TranslationRequest};

type DetectFn = Box<dyn Fn(&str) -> Result<Vec<Detection>, String> + Send + Sync>;
type TranslateFn = Box<dyn Fn(&TranslationRequest) -> Result<Translation, String> + Send + Sync>;
type DelayFn = Box<dyn Fn(&TranslationRequest) -> Duration + Send + Sync>;
type DetectDelayFn = Box<dyn Fn(&str) -> Duration + Send + Sync>;

/// Scripted in-memory backend recording every call it receives
pub struct MockApi {
    languages: Result<Vec<Language>, String>,
    detect: DetectFn,
    translate: TranslateFn,
    translate_delay: DelayFn,
    detect_delay: DetectDelayFn,
    pub language_calls: AtomicUsize,
    pub detect_calls: Mutex<Vec<String>>,
    pub translate_calls: Mutex<Vec<TranslationRequest>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            languages: Ok(Vec::new()),
            detect: Box::new(|_| Ok(vec![detection("en", 99)])),
            translate: Box::new(|req| {
                Ok(Translation {
                    translated_text: format!("[{}] {}", req.target, req.text),
                })
            }),
            translate_delay: Box::new(|_| Duration::ZERO),
            detect_delay: Box::new(|_| Duration::ZERO),
            language_calls: AtomicUsize::new(0),
            detect_calls: Mutex::new(Vec::new()),
            translate_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_languages(mut self, languages: &[(&str, &str)]) -> Self {
        self.languages = Ok(languages
            .iter()
            .map(|(code, name)| Language {
                code: code.to_string(),
                name: name.to_string(),
            })
            .collect());
        self
    }

    pub fn failing_languages(mut self, message: &str) -> Self {
        self.languages = Err(message.to_string());
        self
    }

    pub fn on_detect(
        mut self,
        f: impl Fn(&str) -> Result<Vec<Detection>, String> + Send + Sync + 'static,
    ) -> Self {
        self.detect = Box::new(f);
        self
    }

    pub fn on_translate(
        mut self,
        f: impl Fn(&TranslationRequest) -> Result<Translation, String> + Send + Sync + 'static,
    ) -> Self {
        self.translate = Box::new(f);
        self
    }

    pub fn translate_delay(
        mut self,
        f: impl Fn(&TranslationRequest) -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.translate_delay = Box::new(f);
        self
    }

    pub fn detect_delay(mut self, f: impl Fn(&str) -> Duration + Send + Sync + 'static) -> Self {
        self.detect_delay = Box::new(f);
        self
    }

    pub fn detect_calls(&self) -> Vec<String> {
        self.detect_calls.lock().unwrap().clone()
    }

    pub fn translate_calls(&self) -> Vec<TranslationRequest> {
        self.translate_calls.lock().unwrap().clone()
    }
}

pub fn detection(language: &str, confidence: u32) -> Detection {
    Detection {
        language: language.to_string(),
        confidence: f64::from(confidence),
    }
}

#[async_trait::async_trait]
impl TranslationApi for MockApi {
    async fn fetch_languages(&self) -> Result<Vec<Language>, TranslateError> {
        self.language_calls.fetch_add(1, Ordering::SeqCst);
        self.languages.clone().map_err(TranslateError::ApiError)
    }

    async fn detect(&self, text: &str, _api_key: &str) -> Result<Vec<Detection>, TranslateError> {
        self.detect_calls.lock().unwrap().push(text.to_string());

        let delay = (self.detect_delay)(text);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        (self.detect)(text).map_err(TranslateError::ApiError)
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError> {
        self.translate_calls.lock().unwrap().push(request.clone());

        let delay = (self.translate_delay)(request);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        (self.translate)(request).map_err(TranslateError::ApiError)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "mock".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}
