//! Channel connection loop.
//!
//! Drives one established connection: announce with `auth`, then relay
//! inbound `notify:jobs` events onto the [`EventBus`] while draining
//! queued outbound commands. The loop is generic over a text sink/stream
//! pair, so the WebSocket transport is an adapter and the loop itself is
//! testable with in-memory channels.

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::mpsc;

use super::messages::{ClientCommand, ServerEvent};
use crate::auth::TokenSource;
use crate::domain::{EventBus, JobsNotification};
use crate::error::BridgeError;

/// Runs one established connection until the peer closes the stream or
/// every command sender is dropped.
///
/// Exactly one `auth` command goes out first, carrying the token read at
/// this moment. Inbound frames that do not decode as a known event are
/// ignored; they are the server's business, not ours.
pub(crate) async fn run_connection<Tx, Rx>(
    mut sink: Tx,
    mut stream: Rx,
    bus: &EventBus,
    tokens: &dyn TokenSource,
    commands: &mut mpsc::UnboundedReceiver<ClientCommand>,
) -> Result<(), BridgeError>
where
    Tx: Sink<String, Error = BridgeError> + Unpin,
    Rx: Stream<Item = Result<String, BridgeError>> + Unpin,
{
    send_command(&mut sink, &ClientCommand::Auth(tokens.token())).await?;

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(command) => send_command(&mut sink, &command).await?,
                // Every bridge handle is gone; nothing left to relay for.
                None => return Ok(()),
            },
            frame = stream.next() => match frame {
                Some(Ok(text)) => dispatch_frame(&text, bus),
                Some(Err(err)) => return Err(err),
                None => return Ok(()),
            },
        }
    }
}

async fn send_command<Tx>(sink: &mut Tx, command: &ClientCommand) -> Result<(), BridgeError>
where
    Tx: Sink<String, Error = BridgeError> + Unpin,
{
    let text = serde_json::to_string(command)?;
    sink.send(text).await
}

/// Decodes a frame and relays known events; everything else is skipped.
fn dispatch_frame(text: &str, bus: &EventBus) {
    match serde_json::from_str::<ServerEvent>(text) {
        Ok(ServerEvent::NotifyJobs(payload)) => {
            let delivered = bus.publish(JobsNotification::new(payload));
            tracing::debug!(delivered, "relayed jobs notification");
        }
        Err(_) => tracing::debug!(frame = text, "ignoring unrecognized frame"),
    }
}
