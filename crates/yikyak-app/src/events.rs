use std::time::Duration;

use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;
use yikyak_core::TranslateSession;
use yikyak_types::{AppEvent, TargetSelector};

use crate::ui;

/// How long `:quit` (or end of input) waits for in-flight requests
const QUIT_GRACE: Duration = Duration::from_secs(10);

/// App's main loop: applies user events to the session
pub async fn event_loop(
    session: TranslateSession,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!("[EVENT_LOOP] Event received: {:?}", event);
        if !handle_event(&session, event) {
            wait_idle(&session, QUIT_GRACE).await;
            cancel.cancel();
            break;
        }
    }

    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}

/// Returns `false` once the user asked to quit
pub fn handle_event(session: &TranslateSession, event: AppEvent) -> bool {
    match event {
        AppEvent::TextInput(text) => {
            session.set_input_text(text);
        }
        AppEvent::SelectTarget(TargetSelector::Index(index)) => {
            session.set_target_language_index(index);
            println!("{}", ui::describe_target(&session.state()));
        }
        AppEvent::SelectTarget(TargetSelector::Code(code)) => {
            let state = session.state();
            match state.index_of(&code) {
                Some(index) => {
                    session.set_target_language_index(index);
                    println!("{}", ui::describe_target(&session.state()));
                }
                None => println!("Unknown language code '{}'", code),
            }
        }
        AppEvent::Translate => {
            // Result arrives through the render loop
            session.translate();
        }
        AppEvent::ListLanguages => {
            println!("{}", ui::format_languages(&session.state()));
        }
        AppEvent::ShowState => {
            println!("{}", ui::format_state(&session.state()));
        }
        AppEvent::Quit => return false,
    }

    true
}

/// Wait until nothing is in flight, or `limit` elapses
async fn wait_idle(session: &TranslateSession, limit: Duration) {
    let mut state_rx = session.subscribe();
    let idle = tokio::time::timeout(limit, async {
        let _ = state_rx.wait_for(|s| !s.is_busy()).await;
    })
    .await;

    if idle.is_err() {
        tracing::warn!("Requests still in flight after {:?}, quitting anyway", limit);
    }
}
