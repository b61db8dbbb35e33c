use std::sync::Arc;

use tokio::sync::RwLock;
use yikyak_config::Config;
use yikyak_core::TranslateSession;
use yikyak_translator::TranslationApi;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub session: TranslateSession,
}

impl AppState {
    /// Starts the translate session, so this needs a running runtime
    pub fn new(config: Config, api: Arc<dyn TranslationApi>) -> Self {
        let session = TranslateSession::start(api, &config);

        Self {
            config: Arc::new(RwLock::new(config)),
            session,
        }
    }
}
