//! In-process transport backed by a `tokio::sync::broadcast` channel.
//!
//! [`LocalBus`] is the same-machine variant of the sync channel: every
//! publish loops straight back to all local subscribers. It composes a
//! dashboard and one or more display clients running in a single
//! process, and it is what the runtime tests drive.

use tokio::sync::broadcast;

use crate::channel::SyncChannel;
use crate::message::SyncMessage;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out sync channel.
pub struct LocalBus {
    sender: broadcast::Sender<SyncMessage>,
}

impl LocalBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer fills, the oldest un-consumed messages are
    /// dropped and slow receivers observe `RecvError::Lagged` -- the
    /// best-effort contract, not an error.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }
}

impl SyncChannel for LocalBus {
    fn publish(&self, message: SyncMessage) {
        // Ignore the SendError -- it only means there are zero receivers.
        let _ = self.sender.send(message);
    }

    fn subscribe(&self) -> broadcast::Receiver<SyncMessage> {
        self.sender.subscribe()
    }
}

impl Default for LocalBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
