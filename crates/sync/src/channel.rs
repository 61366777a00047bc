//! The transport-agnostic channel contract.

use tokio::sync::broadcast;

use crate::message::SyncMessage;

/// Publish/subscribe over the sync channel.
///
/// Delivery is best effort: a publish may be dropped (no subscribers,
/// transport down, slow receiver lagging out), and nothing orders
/// messages from independent publishers. Subscribers receive every
/// message delivered after they subscribe; dropping the receiver is the
/// unsubscribe. Each subscriber consumes from its own receiver in its
/// own task, so a failing consumer cannot affect the rest.
///
/// Implementations must keep subscriptions valid across any internal
/// transport reconnects.
pub trait SyncChannel: Send + Sync {
    /// Publish a message to every connected subscriber, local and remote.
    fn publish(&self, message: SyncMessage);

    /// Subscribe to all messages delivered on this channel.
    fn subscribe(&self) -> broadcast::Receiver<SyncMessage>;
}
