//! The notification bridge: public handle and connection task.
//!
//! [`JobsBridge::connect`] spawns a task that owns the WebSocket for its
//! whole life. The handle left behind is a thin front: it queues outbound
//! commands and exposes the channel state; everything else happens on the
//! task.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt, future};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use super::connection::run_connection;
use super::messages::ClientCommand;
use crate::auth::TokenSource;
use crate::config::BridgeConfig;
use crate::domain::{EventBus, ProjectId};
use crate::error::BridgeError;

/// Connection state of the notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// Channel constructed or torn down; no completed handshake.
    Disconnected,
    /// Handshake completed; events flow.
    Connected,
}

/// Handle to the notification channel.
///
/// Cheap to clone. Dropping every handle closes the outbound command
/// queue, which ends the connection task.
#[derive(Debug, Clone)]
pub struct JobsBridge {
    commands: mpsc::UnboundedSender<ClientCommand>,
    state: watch::Receiver<ChannelState>,
}

impl JobsBridge {
    /// Spawns the connection task for the configured channel.
    ///
    /// The task resolves the channel URL once, connects, authenticates
    /// with the token source's current value, and relays server events
    /// onto `bus` until the stream closes. Connection failures surface as
    /// the task's return value; the handle itself never errors.
    #[must_use]
    pub fn connect(
        config: &BridgeConfig,
        tokens: Arc<dyn TokenSource>,
        bus: EventBus,
    ) -> (Self, JoinHandle<Result<(), BridgeError>>) {
        let url = config.channel_url();
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ChannelState::Disconnected);

        let task = tokio::spawn(connection_task(url, tokens, bus, state_tx, commands_rx));

        (
            Self {
                commands: commands_tx,
                state: state_rx,
            },
            task,
        )
    }

    /// Asks the server to start pushing job-change notifications for
    /// `project`.
    ///
    /// The command is queued regardless of the current channel state and
    /// goes out once the channel is up and authenticated. When the
    /// connection task is already gone the command is dropped with a
    /// warning; nothing retries.
    pub fn listen_jobs(&self, project: ProjectId) {
        if self
            .commands
            .send(ClientCommand::ListenJobs(project))
            .is_err()
        {
            tracing::warn!(%project, "connection task gone; listen:jobs dropped");
        }
    }

    /// Returns the current channel state.
    #[must_use]
    pub fn state(&self) -> ChannelState {
        *self.state.borrow()
    }

    /// Waits until the channel reaches `target`.
    ///
    /// Returns `false` when the connection task went away first.
    pub async fn wait_for(&mut self, target: ChannelState) -> bool {
        self.state.wait_for(|state| *state == target).await.is_ok()
    }
}

/// Connects, then drives the channel until it closes.
async fn connection_task(
    url: String,
    tokens: Arc<dyn TokenSource>,
    bus: EventBus,
    state: watch::Sender<ChannelState>,
    mut commands: mpsc::UnboundedReceiver<ClientCommand>,
) -> Result<(), BridgeError> {
    tracing::info!(%url, "connecting notification channel");
    let (socket, response) = connect_async(url.as_str()).await?;
    tracing::info!(status = %response.status(), "notification channel connected");
    let _ = state.send(ChannelState::Connected);

    let (ws_sink, ws_stream) = socket.split();
    let sink = ws_sink
        .sink_map_err(BridgeError::from)
        .with(|text: String| future::ready(Ok::<Message, BridgeError>(Message::text(text))));
    let stream = ws_stream.filter_map(|frame| {
        future::ready(match frame {
            Ok(Message::Text(text)) => Some(Ok(text.to_string())),
            Ok(_) => None,
            Err(err) => Some(Err(BridgeError::from(err))),
        })
    });

    let result = run_connection(
        Box::pin(sink),
        Box::pin(stream),
        &bus,
        tokens.as_ref(),
        &mut commands,
    )
    .await;
    let _ = state.send(ChannelState::Disconnected);

    match &result {
        Ok(()) => tracing::info!("notification channel closed"),
        Err(err) => tracing::warn!(error = %err, "notification channel failed"),
    }
    result
}
