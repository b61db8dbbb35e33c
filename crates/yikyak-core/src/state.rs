use yikyak_types::Language;

/// Snapshot of a translate session, published to the presentation layer
/// on every change.
///
/// Error fields are `None` when the last run of that operation succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub input_text: String,
    pub languages: Vec<Language>,
    /// Index into `languages`, not validated until translate
    pub target_index: usize,
    pub translation: String,
    pub detected_language: String,

    pub load_languages_error: Option<String>,
    pub detect_text_error: Option<String>,
    pub translate_text_error: Option<String>,

    pub loading_languages: bool,
    pub detecting: bool,
    pub translating: bool,
}

impl SessionState {
    /// Names to show in the target language picker, in list order
    pub fn language_names(&self) -> Vec<&str> {
        self.languages.iter().map(|l| l.name.as_str()).collect()
    }

    pub fn target_language(&self) -> Option<&Language> {
        self.languages.get(self.target_index)
    }

    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.languages
            .iter()
            .position(|l| l.code.eq_ignore_ascii_case(code))
    }

    /// Most relevant error for display: translate, then detect, then load
    pub fn error_message(&self) -> Option<&str> {
        self.translate_text_error
            .as_deref()
            .or(self.detect_text_error.as_deref())
            .or(self.load_languages_error.as_deref())
    }

    pub fn is_busy(&self) -> bool {
        self.loading_languages || self.detecting || self.translating
    }
}
