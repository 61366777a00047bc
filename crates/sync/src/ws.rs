//! Network transport: WebSocket client to the central broadcast relay.
//!
//! [`WsChannel`] owns one long-lived connection task (connect -> pump ->
//! reconnect) against the relay endpoint. Inbound text frames are parsed
//! into [`SyncMessage`]s and fanned into a broadcast sender that outlives
//! any single connection, so subscribers keep their receivers across
//! reconnects without re-subscribing. Outbound publishes are dropped with
//! a warning while the link is down -- delivery is best effort.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use crate::channel::SyncChannel;
use crate::message::SyncMessage;

/// Buffer capacity for the inbound fan-out channel.
const INBOUND_CAPACITY: usize = 256;

/// Tunable parameters for the relay connection.
#[derive(Debug, Clone)]
pub struct WsChannelConfig {
    /// Relay endpoint, e.g. `ws://localhost:3001/api/v1/ws`.
    pub url: String,
    /// Fixed delay between reconnect attempts after a lost link.
    pub reconnect_interval: Duration,
}

impl WsChannelConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect_interval: Duration::from_secs(5),
        }
    }
}

/// Sync channel over a central WebSocket relay.
pub struct WsChannel {
    inbound: broadcast::Sender<SyncMessage>,
    outbound: mpsc::UnboundedSender<SyncMessage>,
    connected: Arc<AtomicBool>,
    cancel: CancellationToken,
}

impl WsChannel {
    /// Spawn the connection task and return the channel handle.
    ///
    /// The task keeps retrying until [`shutdown`](Self::shutdown); a
    /// relay that is down at startup is the same transient condition as
    /// one that drops later.
    pub fn connect(config: WsChannelConfig) -> Arc<Self> {
        let (inbound, _) = broadcast::channel(INBOUND_CAPACITY);
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let connected = Arc::new(AtomicBool::new(false));
        let cancel = CancellationToken::new();

        let channel = Arc::new(Self {
            inbound: inbound.clone(),
            outbound: outbound_tx,
            connected: Arc::clone(&connected),
            cancel: cancel.clone(),
        });

        tokio::spawn(run_connection_loop(
            config,
            inbound,
            outbound_rx,
            connected,
            cancel,
        ));

        channel
    }

    /// Whether the relay link is currently up.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Stop the connection task and close the link.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl SyncChannel for WsChannel {
    fn publish(&self, message: SyncMessage) {
        if !self.is_connected() {
            tracing::warn!(kind = ?message.kind, "Relay not connected, message not sent");
            return;
        }
        // The connection task owns the receiver; a send error only means
        // the task already exited during shutdown.
        let _ = self.outbound.send(message);
    }

    fn subscribe(&self) -> broadcast::Receiver<SyncMessage> {
        self.inbound.subscribe()
    }
}

impl Drop for WsChannel {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Core connection loop: connect -> pump messages -> reconnect.
///
/// Runs until the cancellation token is triggered.
async fn run_connection_loop(
    config: WsChannelConfig,
    inbound: broadcast::Sender<SyncMessage>,
    mut outbound_rx: mpsc::UnboundedReceiver<SyncMessage>,
    connected: Arc<AtomicBool>,
    cancel: CancellationToken,
) {
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        let result = tokio::select! {
            _ = cancel.cancelled() => return,
            result = tokio_tungstenite::connect_async(config.url.as_str()) => result,
        };

        match result {
            Ok((ws_stream, _response)) => {
                tracing::info!(url = %config.url, "Connected to sync relay");
                attempt = 0;
                connected.store(true, Ordering::SeqCst);

                pump_messages(ws_stream, &inbound, &mut outbound_rx, &cancel).await;

                connected.store(false, Ordering::SeqCst);
                if cancel.is_cancelled() {
                    return;
                }
                tracing::info!(url = %config.url, "Sync relay link lost, scheduling reconnect");
            }
            Err(e) => {
                tracing::warn!(
                    url = %config.url,
                    attempt,
                    error = %e,
                    "Failed to connect to sync relay",
                );
            }
        }

        // Fixed-interval backoff, respecting cancellation.
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(config.reconnect_interval) => {}
        }
    }
}

/// Pump one live connection until it drops or the channel shuts down.
///
/// Outbound messages are serialized onto the socket; inbound text frames
/// are parsed and fanned out. A frame that fails to parse is logged and
/// dropped -- the connection stays up and later frames are unaffected.
async fn pump_messages<S>(
    ws_stream: tokio_tungstenite::WebSocketStream<S>,
    inbound: &broadcast::Sender<SyncMessage>,
    outbound_rx: &mut mpsc::UnboundedReceiver<SyncMessage>,
    cancel: &CancellationToken,
) where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    let (mut sink, mut stream) = ws_stream.split();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                let _ = sink.send(Message::Close(None)).await;
                return;
            }

            outgoing = outbound_rx.recv() => {
                let Some(message) = outgoing else { return };
                match serde_json::to_string(&message) {
                    Ok(text) => {
                        if let Err(e) = sink.send(Message::Text(text.into())).await {
                            tracing::debug!(error = %e, "Relay sink closed");
                            return;
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to serialize sync message");
                    }
                }
            }

            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<SyncMessage>(&text) {
                            // Zero local subscribers is fine; ignore the error.
                            Ok(message) => { let _ = inbound.send(message); }
                            Err(e) => {
                                tracing::warn!(error = %e, "Dropping malformed sync message");
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::debug!("Relay closed the connection");
                        return;
                    }
                    // Pings are answered by the protocol layer; binary
                    // frames are not part of this protocol.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::debug!(error = %e, "Relay receive error");
                        return;
                    }
                }
            }
        }
    }
}
