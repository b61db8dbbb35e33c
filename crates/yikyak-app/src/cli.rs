use clap::Parser;
use yikyak_config::{Config, DetectionMode};

/// Interactive terminal translator backed by a LibreTranslate server
#[derive(Parser, Debug, Default)]
#[command(name = "yikyak", version, long_about = None)]
pub struct Args {
    /// Base URL of the translation server
    #[arg(long)]
    pub api_url: Option<String>,

    /// API key sent with every request
    #[arg(long)]
    pub api_key: Option<String>,

    /// When to detect the input language: immediate, debounced or on-translate
    #[arg(long)]
    pub detection_mode: Option<DetectionMode>,

    /// Quiet period before debounced detection, in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}

impl Args {
    /// Flags win over environment and defaults
    pub fn apply(self, config: &mut Config) {
        if let Some(api_url) = self.api_url {
            config.translator.api_url = api_url;
        }
        if let Some(api_key) = self.api_key {
            config.translator.api_key = api_key;
        }
        if let Some(mode) = self.detection_mode {
            config.session.detection_mode = mode;
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.session.debounce_ms = debounce_ms;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "yikyak",
            "--api-url",
            "http://localhost:5000",
            "--detection-mode",
            "on-translate",
            "--debounce-ms",
            "250",
        ]);

        let mut config = Config::default();
        args.apply(&mut config);

        assert_eq!(config.translator.api_url, "http://localhost:5000");
        assert_eq!(config.translator.api_key, "");
        assert_eq!(config.session.detection_mode, DetectionMode::OnTranslate);
        assert_eq!(config.session.debounce_ms, 250);
    }

    #[test]
    fn rejects_unknown_detection_mode() {
        let result = Args::try_parse_from(["yikyak", "--detection-mode", "never"]);
        assert!(result.is_err());
    }
}
