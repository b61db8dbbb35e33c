use std::env;

use serde::{Deserialize, Serialize};

use self::session::SessionConfig;
use self::translator::TranslatorConfig;

pub mod session;
pub mod translator;

pub use session::{DetectionMode, ParseDetectionModeError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub session: SessionConfig,

    /// Render loop tick
    pub delta_time: u64,
    /// Capacity of the input -> event loop channel
    pub event_channel_capacity: usize,
}

impl Config {
    pub fn new() -> Self {
        let delta_time = env::var("DELTA_TIME_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100); // 100ms default

        Config {
            translator: TranslatorConfig::new(),
            session: SessionConfig::new(),

            delta_time,
            event_channel_capacity: 64,
        }
    }
}

impl Default for Config {
    /// Built-in defaults, no environment lookups
    fn default() -> Self {
        Self {
            translator: TranslatorConfig::default(),
            session: SessionConfig::default(),
            delta_time: 100,
            event_channel_capacity: 64,
        }
    }
}
