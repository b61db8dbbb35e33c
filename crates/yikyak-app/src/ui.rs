use std::fmt::Write;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use yikyak_core::SessionState;

/// Print session changes, coalesced to one render per tick
pub async fn render_loop(
    mut state_rx: watch::Receiver<SessionState>,
    delta_time: Duration,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut interval = tokio::time::interval(delta_time);
    let mut previous = state_rx.borrow_and_update().clone();

    loop {
        let stopping = tokio::select! {
            _ = cancel.cancelled() => true,
            _ = interval.tick() => false,
        };

        // Flush whatever changed since the last tick, also on the way out
        if state_rx.has_changed()? {
            let current = state_rx.borrow_and_update().clone();
            for line in describe_changes(&previous, &current) {
                println!("{line}");
            }
            previous = current;
        }

        if stopping {
            break;
        }
    }

    Ok(())
}

/// Lines worth showing for the transition `previous` -> `current`
pub fn describe_changes(previous: &SessionState, current: &SessionState) -> Vec<String> {
    let mut lines = Vec::new();

    if previous.loading_languages && !current.loading_languages {
        match &current.load_languages_error {
            Some(error) => lines.push(format!("! Could not load languages: {error}")),
            None => {
                lines.push(format!("{} languages available", current.languages.len()));
                lines.push(describe_target(current));
            }
        }
    }

    if !previous.detecting && current.detecting {
        lines.push("… detecting language".to_string());
    }

    if current.detected_language != previous.detected_language
        && !current.detected_language.is_empty()
    {
        lines.push(format!("Detected: {}", current.detected_language));
    }

    if current.detect_text_error != previous.detect_text_error {
        if let Some(error) = &current.detect_text_error {
            lines.push(format!("! Detection failed: {error}"));
        }
    }

    if !previous.translating && current.translating {
        lines.push("… translating".to_string());
    }

    if current.translation != previous.translation && !current.translation.is_empty() {
        lines.push(format!("=> {}", current.translation));
    }

    if current.translate_text_error != previous.translate_text_error {
        if let Some(error) = &current.translate_text_error {
            lines.push(format!("! Translation failed: {error}"));
        }
    }

    lines
}

pub fn describe_target(state: &SessionState) -> String {
    match state.target_language() {
        Some(language) => format!("Target: {} ({})", language.name, language.code),
        None => format!("Target: none (index {} not available)", state.target_index),
    }
}

pub fn format_languages(state: &SessionState) -> String {
    if state.languages.is_empty() {
        return "No languages loaded".to_string();
    }

    let mut out = String::new();
    for (index, name) in state.language_names().into_iter().enumerate() {
        let marker = if index == state.target_index { '*' } else { ' ' };
        let code = &state.languages[index].code;
        let _ = writeln!(out, "{marker} {index:>3}  {code:<6} {name}");
    }
    out.pop();
    out
}

pub fn format_state(state: &SessionState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "input:      {:?}", state.input_text);
    let _ = writeln!(out, "{}", describe_target(state));
    let _ = writeln!(out, "detected:   {}", or_dash(&state.detected_language));
    let _ = writeln!(out, "translation: {}", or_dash(&state.translation));
    let _ = write!(out, "error:      {}", state.error_message().unwrap_or("-"));
    out
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
