/// Events sent from the presentation layer to the app event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    TextInput(String),
    SelectTarget(TargetSelector),
    Translate,
    ListLanguages,
    ShowState,
    Quit,
}

/// How the user picked a target language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSelector {
    Index(usize),
    Code(String),
}

impl AppEvent {
    /// Parse one line of terminal input.
    ///
    /// Anything not starting with `:` is text to translate. Returns `None`
    /// for unknown or malformed commands.
    pub fn parse_line(line: &str) -> Option<Self> {
        let Some(command) = line.strip_prefix(':') else {
            return Some(AppEvent::TextInput(line.to_string()));
        };

        let mut parts = command.trim().splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).unwrap_or_default();

        match name {
            "t" | "translate" => Some(AppEvent::Translate),
            "languages" | "langs" => Some(AppEvent::ListLanguages),
            "state" => Some(AppEvent::ShowState),
            "q" | "quit" => Some(AppEvent::Quit),
            "target" if !arg.is_empty() => {
                let selector = match arg.parse::<usize>() {
                    Ok(index) => TargetSelector::Index(index),
                    Err(_) => TargetSelector::Code(arg.to_string()),
                };
                Some(AppEvent::SelectTarget(selector))
            }
            _ => None,
        }
    }
}
