use yikyak_translator::TranslateError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] TranslateError),

    #[error("no target language selected")]
    NoTargetLanguage,

    #[error("language detection returned no candidates")]
    NoDetection,

    #[error("source language unavailable: {0}")]
    SourceLanguageUnavailable(String),

    #[error("orchestration error: {0}")]
    Orchestration(String),
}
