//! Integration tests for the WebSocket sync transport.
//!
//! Runs a minimal in-process broadcast relay (accept -> fan every text
//! frame out to all peers, sender included) and exercises the client
//! against it: fan-out delivery, malformed-frame tolerance, publish
//! while disconnected, and subscription survival across a relay restart.

use std::net::SocketAddr;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use vitrina_sync::{MessageKind, SyncChannel, SyncMessage, WsChannel, WsChannelConfig};

// ---------------------------------------------------------------------------
// Minimal relay
// ---------------------------------------------------------------------------

/// Spawn a relay bound to `addr`.
///
/// Returns a cancellation token that tears down the listener and every
/// open connection (simulating a relay crash), plus a sender that lets
/// tests inject raw frames as if a peer had published.
async fn spawn_relay(addr: SocketAddr) -> (CancellationToken, broadcast::Sender<String>) {
    let listener = TcpListener::bind(addr).await.expect("bind relay");
    let (fanout, _) = broadcast::channel::<String>(64);
    let fanout_accept = fanout.clone();
    let cancel = CancellationToken::new();
    let cancel_accept = cancel.clone();

    tokio::spawn(async move {
        loop {
            let socket = tokio::select! {
                _ = cancel_accept.cancelled() => return,
                accepted = listener.accept() => {
                    let Ok((socket, _peer)) = accepted else { return };
                    socket
                }
            };
            tokio::spawn(relay_connection(
                socket,
                fanout_accept.clone(),
                cancel_accept.clone(),
            ));
        }
    });

    (cancel, fanout)
}

async fn relay_connection(
    socket: TcpStream,
    fanout: broadcast::Sender<String>,
    cancel: CancellationToken,
) {
    let Ok(ws) = tokio_tungstenite::accept_async(socket).await else {
        return;
    };
    let (mut sink, mut stream) = ws.split();
    let mut rx = fanout.subscribe();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            frame = stream.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        let _ = fanout.send(text.to_string());
                    }
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => return,
                    Some(Ok(_)) => {}
                }
            }
            outgoing = rx.recv() => {
                let Ok(text) = outgoing else { continue };
                if sink.send(Message::Text(text.into())).await.is_err() {
                    return;
                }
            }
        }
    }
}

/// Pick an unused local port by binding and dropping a listener.
async fn free_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

fn test_config(addr: SocketAddr) -> WsChannelConfig {
    WsChannelConfig {
        url: format!("ws://{addr}"),
        // Keep the tests snappy; production uses 5 s.
        reconnect_interval: Duration::from_millis(100),
    }
}

async fn wait_connected(channel: &WsChannel) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !channel.is_connected() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("channel should connect");
    // Give the relay's connection task a moment to register the peer.
    tokio::time::sleep(Duration::from_millis(50)).await;
}

async fn recv_one(
    rx: &mut broadcast::Receiver<SyncMessage>,
    what: &str,
) -> SyncMessage {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap_or_else(|_| panic!("timed out waiting for {what}"))
        .expect("receiver should stay open")
}

// ---------------------------------------------------------------------------
// Test: publish from one peer reaches another peer's subscriber
// ---------------------------------------------------------------------------

#[tokio::test]
async fn publish_fans_out_to_other_peers() {
    let addr = free_addr().await;
    let (_relay, _fanout) = spawn_relay(addr).await;

    let publisher = WsChannel::connect(test_config(addr));
    let consumer = WsChannel::connect(test_config(addr));
    wait_connected(&publisher).await;
    wait_connected(&consumer).await;

    let mut rx = consumer.subscribe();
    publisher.publish(SyncMessage::media_updated(serde_json::json!({"id": "m1"})));

    let received = recv_one(&mut rx, "fan-out delivery").await;
    assert_eq!(received.kind, MessageKind::MediaUpdated);
    assert_eq!(received.data["id"], "m1");

    publisher.shutdown();
    consumer.shutdown();
}

// ---------------------------------------------------------------------------
// Test: the relay echoes a publish back to the publishing peer
// ---------------------------------------------------------------------------

#[tokio::test]
async fn publisher_hears_its_own_message() {
    let addr = free_addr().await;
    let (_relay, _fanout) = spawn_relay(addr).await;

    let channel = WsChannel::connect(test_config(addr));
    wait_connected(&channel).await;

    let mut rx = channel.subscribe();
    channel.publish(SyncMessage::screen_updated(serde_json::Value::Null));

    let received = recv_one(&mut rx, "echoed delivery").await;
    assert_eq!(received.kind, MessageKind::ScreenUpdated);

    channel.shutdown();
}

// ---------------------------------------------------------------------------
// Test: a malformed frame is dropped, later frames still deliver
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_frame_does_not_poison_the_link() {
    let addr = free_addr().await;
    let (_relay, fanout) = spawn_relay(addr).await;

    let channel = WsChannel::connect(test_config(addr));
    wait_connected(&channel).await;
    let mut rx = channel.subscribe();

    // Inject garbage straight into the fan-out, then a valid message.
    fanout.send("this is not json".to_string()).unwrap();
    let valid = SyncMessage::media_updated(serde_json::json!({"id": "after-garbage"}));
    fanout.send(serde_json::to_string(&valid).unwrap()).unwrap();

    let received = recv_one(&mut rx, "message after garbage").await;
    assert_eq!(received.data["id"], "after-garbage");

    channel.shutdown();
}

// ---------------------------------------------------------------------------
// Test: disconnect drops publishes, reconnect resumes delivery without
// re-subscribing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn subscription_survives_relay_restart() {
    let addr = free_addr().await;
    let (relay, _fanout) = spawn_relay(addr).await;

    let channel = WsChannel::connect(test_config(addr));
    wait_connected(&channel).await;
    let mut rx = channel.subscribe();

    // Kill the relay and wait for the client to notice.
    relay.cancel();
    tokio::time::timeout(Duration::from_secs(5), async {
        while channel.is_connected() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("channel should notice the disconnect");

    // Publishing into the void is dropped, not an error.
    channel.publish(SyncMessage::media_updated(serde_json::json!({"id": "lost"})));

    // Bring the relay back on the same address; the client reconnects on
    // its own and the old receiver keeps working.
    let (_relay2, fanout2) = spawn_relay(addr).await;
    wait_connected(&channel).await;

    let valid = SyncMessage::media_updated(serde_json::json!({"id": "after-restart"}));
    fanout2.send(serde_json::to_string(&valid).unwrap()).unwrap();

    let received = recv_one(&mut rx, "post-restart delivery").await;
    assert_eq!(received.data["id"], "after-restart");

    channel.shutdown();
}
