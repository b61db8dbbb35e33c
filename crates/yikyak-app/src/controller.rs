use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, Sender};
use tokio::task::JoinSet;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};
use yikyak_types::AppEvent;

use crate::events::event_loop;
use crate::io::spawn_stdin_reader;
use crate::state::AppState;
use crate::ui::render_loop;

/// Centralized channel management
pub struct ChannelSet {
    /// Terminal reader thread -> event loop
    pub ui_to_app: (Sender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = kanal::bounded(capacity);
        Self {
            ui_to_app: (tx, rx.to_async()),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let (capacity, delta_time) = {
            let config = self.state.config.read().await;
            (
                config.event_channel_capacity,
                Duration::from_millis(config.delta_time),
            )
        };

        let channels = ChannelSet::new(capacity);
        let (ui_tx, app_rx) = channels.ui_to_app;

        // Blocking stdin reads live on a plain thread so they never hold up
        // runtime shutdown
        spawn_stdin_reader(ui_tx, atty::is(atty::Stream::Stdin));

        let mut tasks = JoinSet::new();

        // The event loop gets the root token: `:quit` shuts the whole app down
        tasks.spawn(event_loop(
            self.state.session.clone(),
            app_rx,
            self.cancel_token.clone(),
        ));

        tasks.spawn(render_loop(
            self.state.session.subscribe(),
            delta_time,
            self.cancel_token.child_token(),
        ));

        tasks
    }

    /// Resolves once shutdown was requested from inside the app
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.cancel_token.cancelled()
    }

    pub fn shutdown(&self) {
        self.state.session.teardown();
        self.cancel_token.cancel();
    }
}
