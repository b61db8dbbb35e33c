use std::io::BufRead;
use std::thread;

use kanal::Sender;
use yikyak_types::AppEvent;

const HELP: &str = "\
Type text to translate, or a command:
  :target <index|code>  choose the target language
  :translate, :t        detect and translate the current text
  :languages            list available languages
  :state                show the whole session state
  :quit, :q             exit";

/// Read terminal lines on a dedicated thread and forward them as events.
///
/// End of input is turned into [`AppEvent::Quit`].
pub fn spawn_stdin_reader(tx: Sender<AppEvent>, interactive: bool) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        if interactive {
            println!("{HELP}");
        }

        read_events(std::io::stdin().lock(), &tx);
        tracing::debug!("stdin reader stopping");
    })
}

/// Forward every line of `input` to `tx` until input ends or the receiver
/// is gone.
pub fn read_events(input: impl BufRead, tx: &Sender<AppEvent>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                break;
            }
        };

        let Some(event) = AppEvent::parse_line(&line) else {
            println!("Unknown command '{}'\n{HELP}", line.trim());
            continue;
        };

        let quit = event == AppEvent::Quit;
        if tx.send(event).is_err() || quit {
            return;
        }
    }

    let _ = tx.send(AppEvent::Quit);
}
