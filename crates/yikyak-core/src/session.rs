use std::any::Any;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use yikyak_config::Config;
use yikyak_config::DetectionMode;
use yikyak_translator::TranslationApi;
use yikyak_types::{LanguageCode, Translation, TranslationRequest};

use crate::debounce::debounce;
use crate::error::SessionError;
use crate::state::SessionState;

/// Which operation a spawned task belongs to, with its sequence token,
/// for error bookkeeping
#[derive(Debug, Clone, Copy)]
enum Operation {
    LoadLanguages,
    Detect(u64),
    Translate(u64),
}

/// Translate session: sequences detect then translate against a
/// [`TranslationApi`] and publishes [`SessionState`] snapshots.
///
/// Cheap to clone, all clones share the same session.
#[derive(Clone)]
pub struct TranslateSession {
    inner: Arc<Inner>,
}

struct Inner {
    api: Arc<dyn TranslationApi>,
    api_key: String,
    mode: DetectionMode,
    state: watch::Sender<SessionState>,
    /// Feeds the debounce worker
    input_tx: watch::Sender<String>,
    cancel: CancellationToken,
    translate_seq: AtomicU64,
    detect_seq: AtomicU64,
}

impl TranslateSession {
    /// Start a session: kicks off the language list fetch and, in debounced
    /// mode, the input debounce worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(api: Arc<dyn TranslationApi>, config: &Config) -> Self {
        let initial = SessionState {
            loading_languages: true,
            ..Default::default()
        };
        let (state, _) = watch::channel(initial);
        let (input_tx, input_rx) = watch::channel(String::new());

        let session = Self {
            inner: Arc::new(Inner {
                api,
                api_key: config.translator.api_key.clone(),
                mode: config.session.detection_mode,
                state,
                input_tx,
                cancel: CancellationToken::new(),
                translate_seq: AtomicU64::new(0),
                detect_seq: AtomicU64::new(0),
            }),
        };

        tracing::info!(
            "Starting translate session (detection: {})",
            config.session.detection_mode
        );

        let inner = session.inner.clone();
        session.spawn_operation(Operation::LoadLanguages, async move {
            inner.load_languages().await;
        });

        if config.session.detection_mode == DetectionMode::Debounced {
            session.spawn_debounce_worker(input_rx, config.session.debounce());
        }

        session
    }

    /// Current snapshot
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn detection_mode(&self) -> DetectionMode {
        self.inner.mode
    }

    pub fn set_input_text(&self, text: impl Into<String>) {
        if self.is_torn_down() {
            return;
        }

        let text = text.into();
        self.inner.publish(|s| s.input_text = text.clone());

        match self.inner.mode {
            DetectionMode::Immediate => {
                self.detect_language();
            }
            DetectionMode::Debounced => {
                self.inner.input_tx.send_replace(text);
            }
            DetectionMode::OnTranslate => {}
        }
    }

    /// Bounds are checked when translating, not here
    pub fn set_target_language_index(&self, index: usize) {
        self.inner.publish(|s| s.target_index = index);
    }

    /// Detect the language of the current input text (fire-and-forget)
    pub fn detect_language(&self) -> JoinHandle<()> {
        let text = self.inner.state.borrow().input_text.clone();
        self.spawn_detect(text)
    }

    /// Detect the source language of the current input, then translate it
    /// into the selected target language.
    ///
    /// Input and target are captured now. If another translate is issued
    /// before this one finishes, this one's result is dropped.
    pub fn translate(&self) -> JoinHandle<()> {
        let token = self.inner.translate_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let (text, target) = {
            let state = self.inner.state.borrow();
            (
                state.input_text.clone(),
                state.target_language().map(|l| l.code.clone()),
            )
        };

        self.inner.publish(|s| s.translating = true);

        let inner = self.inner.clone();
        self.spawn_operation(Operation::Translate(token), async move {
            inner.run_translate(token, text, target).await;
        })
    }

    /// Cancel every outstanding task. The state is frozen afterwards.
    pub fn teardown(&self) {
        let mut first = false;
        // Cancel under the state lock so no write lands after this returns
        self.inner.state.send_if_modified(|_| {
            first = !self.inner.cancel.is_cancelled();
            self.inner.cancel.cancel();
            false
        });

        if first {
            tracing::info!("Tearing down translate session");
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }

    fn spawn_detect(&self, text: String) -> JoinHandle<()> {
        let token = self.inner.begin_detect();
        let inner = self.inner.clone();
        self.spawn_operation(Operation::Detect(token), async move {
            if let Err(e) = inner.detect(token, text).await {
                tracing::debug!("Detect task #{} ended with: {}", token, e);
            }
        })
    }

    fn spawn_debounce_worker(&self, input_rx: watch::Receiver<String>, quiet: std::time::Duration) {
        // Weak so the worker doesn't keep the session alive on its own
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let cancel = self.inner.cancel.clone();

        tokio::spawn(async move {
            let worker = debounce(input_rx, quiet, |text: String| {
                if text.trim().is_empty() {
                    return;
                }
                if let Some(inner) = weak.upgrade() {
                    tracing::debug!("Input settled, detecting language");
                    TranslateSession { inner }.spawn_detect(text);
                }
            });

            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = worker => {}
            }
            tracing::debug!("Debounce worker stopped");
        });
    }

    /// Run `fut` on its own task, cancelled on teardown. A panic inside it
    /// is recorded on the operation's error field instead of being lost,
    /// unless a newer call of the same operation has been issued since.
    fn spawn_operation<F>(&self, operation: Operation, fut: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_torn_down() {
            return tokio::spawn(async {});
        }

        let inner = self.inner.clone();
        let task = tokio::spawn(fut);
        let abort = task.abort_handle();

        tokio::spawn(async move {
            tokio::select! {
                _ = inner.cancel.cancelled() => {
                    abort.abort();
                }
                result = task => {
                    if let Err(e) = result {
                        if e.is_panic() {
                            let message = panic_message(e.into_panic());
                            tracing::error!("{:?} task panicked: {}", operation, message);
                            if inner.is_latest(operation) {
                                inner.record_failure(
                                    operation,
                                    &SessionError::Orchestration(message),
                                );
                            }
                        }
                    }
                }
            }
        })
    }
}

impl Inner {
    /// Apply `f` to the state unless the session has been torn down.
    /// The check runs under the state lock, same as the cancel in teardown.
    fn publish(&self, f: impl FnOnce(&mut SessionState)) {
        self.state.send_if_modified(|s| {
            if self.cancel.is_cancelled() {
                return false;
            }
            f(s);
            true
        });
    }

    fn is_latest(&self, operation: Operation) -> bool {
        match operation {
            Operation::LoadLanguages => true,
            Operation::Detect(token) => self.detect_seq.load(Ordering::SeqCst) == token,
            Operation::Translate(token) => self.translate_seq.load(Ordering::SeqCst) == token,
        }
    }

    fn record_failure(&self, operation: Operation, error: &SessionError) {
        let message = error.to_string();
        self.publish(|s| match operation {
            Operation::LoadLanguages => {
                s.languages.clear();
                s.load_languages_error = Some(message);
                s.loading_languages = false;
            }
            Operation::Detect(_) => {
                s.detected_language.clear();
                s.detect_text_error = Some(message);
                s.detecting = false;
            }
            Operation::Translate(_) => {
                s.translation.clear();
                s.translate_text_error = Some(message);
                s.translating = false;
            }
        });
    }

    async fn load_languages(&self) {
        match self.api.fetch_languages().await {
            Ok(languages) => {
                tracing::info!("Loaded {} languages", languages.len());
                self.publish(|s| {
                    s.languages = languages;
                    s.load_languages_error = None;
                    s.loading_languages = false;
                });
            }
            Err(e) => {
                tracing::error!("Failed to load languages: {}", e);
                self.record_failure(Operation::LoadLanguages, &e.into());
            }
        }
    }

    /// Issue a new detect sequence token and flag detection in flight
    fn begin_detect(&self) -> u64 {
        let token = self.detect_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish(|s| s.detecting = true);
        token
    }

    /// Detect `text` and publish the top-ranked language. Only the latest
    /// issued detect publishes; older results are returned to their caller
    /// but leave the state alone.
    async fn detect(&self, token: u64, text: String) -> Result<LanguageCode, SessionError> {
        let mut guard = DetectGuard {
            inner: self,
            token,
            settled: false,
        };
        let result = match self.api.detect(&text, &self.api_key).await {
            Ok(ranked) => ranked
                .into_iter()
                .next()
                .map(|d| d.language)
                .ok_or(SessionError::NoDetection),
            Err(e) => Err(e.into()),
        };

        guard.settled = true;

        if !self.is_latest(Operation::Detect(token)) {
            tracing::debug!("Dropping superseded detection #{}", token);
            return result;
        }

        match &result {
            Ok(code) => {
                tracing::debug!("Detected language: {}", code);
                let code = code.clone();
                self.publish(|s| {
                    s.detected_language = code;
                    s.detect_text_error = None;
                    s.detecting = false;
                });
            }
            Err(e) => {
                tracing::warn!("Language detection failed: {}", e);
                self.record_failure(Operation::Detect(token), e);
            }
        }

        result
    }

    async fn run_translate(&self, token: u64, text: String, target: Option<LanguageCode>) {
        let result = if text.trim().is_empty() {
            Ok(None)
        } else {
            self.translate_text(text, target).await.map(Some)
        };

        if !self.is_latest(Operation::Translate(token)) {
            tracing::debug!("Discarding superseded translation #{}", token);
            return;
        }

        match result {
            Ok(translation) => {
                let translated = translation.map(|t| t.translated_text).unwrap_or_default();
                self.publish(|s| {
                    s.translation = translated;
                    s.translate_text_error = None;
                    s.translating = false;
                });
            }
            Err(e) => {
                tracing::error!("Translation failed: {}", e);
                self.record_failure(Operation::Translate(token), &e);
            }
        }
    }

    async fn translate_text(
        &self,
        text: String,
        target: Option<LanguageCode>,
    ) -> Result<Translation, SessionError> {
        let target = target.ok_or(SessionError::NoTargetLanguage)?;

        let token = self.begin_detect();
        let source = self
            .detect(token, text.clone())
            .await
            .map_err(|e| SessionError::SourceLanguageUnavailable(e.to_string()))?;

        let request = TranslationRequest::new(text, source, target, self.api_key.as_str());
        tracing::debug!("Translating {} -> {}", request.source, request.target);

        Ok(self.api.translate(&request).await?)
    }
}

/// Settles the `detecting` flag when a detect is unwound before it got to
/// publish, e.g. a panicking backend inside a translate.
struct DetectGuard<'a> {
    inner: &'a Inner,
    token: u64,
    settled: bool,
}

impl Drop for DetectGuard<'_> {
    fn drop(&mut self) {
        if self.settled || !self.inner.is_latest(Operation::Detect(self.token)) {
            return;
        }
        let error = SessionError::Orchestration("language detection did not complete".to_string());
        self.inner.record_failure(Operation::Detect(self.token), &error);
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
