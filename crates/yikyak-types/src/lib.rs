mod events;
mod model;

pub use events::{AppEvent, TargetSelector};
pub use model::{
    DEFAULT_FORMAT, Detection, DetectionRequest, Language, LanguageCode, Translation,
    TranslationRequest,
};
