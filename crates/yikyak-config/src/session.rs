use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// When the session runs language detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionMode {
    /// Detect on every keystroke
    Immediate,
    /// Detect once input has been stable for the quiet period
    #[default]
    Debounced,
    /// Detect only as the first step of a translate
    OnTranslate,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown detection mode '{0}', expected immediate, debounced or on-translate")]
pub struct ParseDetectionModeError(String);

impl FromStr for DetectionMode {
    type Err = ParseDetectionModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "immediate" => Ok(DetectionMode::Immediate),
            "debounced" => Ok(DetectionMode::Debounced),
            "on-translate" | "on_translate" => Ok(DetectionMode::OnTranslate),
            other => Err(ParseDetectionModeError(other.to_string())),
        }
    }
}

impl fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DetectionMode::Immediate => "immediate",
            DetectionMode::Debounced => "debounced",
            DetectionMode::OnTranslate => "on-translate",
        };
        f.write_str(name)
    }
}

fn default_debounce_ms() -> u64 {
    1500
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    #[serde(default)]
    pub detection_mode: DetectionMode,
    /// Quiet period for debounced detection
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl SessionConfig {
    pub fn new() -> Self {
        let detection_mode = env::var("DETECTION_MODE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let debounce_ms = env::var("DEBOUNCE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_debounce_ms);

        Self {
            detection_mode,
            debounce_ms,
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            detection_mode: DetectionMode::default(),
            debounce_ms: default_debounce_ms(),
        }
    }
}
