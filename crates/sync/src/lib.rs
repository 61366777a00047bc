//! Vitrina synchronization channel.
//!
//! The publish/subscribe bus that keeps dashboards and display clients
//! in sync:
//!
//! - [`SyncMessage`] -- the wire envelope (`type` / `data` / `timestamp`).
//! - [`SyncChannel`] -- the transport-agnostic publish/subscribe contract.
//! - [`LocalBus`] -- in-process transport for same-machine composition
//!   and tests.
//! - [`WsChannel`] -- network transport that relays every publish through
//!   a central WebSocket relay and reconnects on a fixed interval when
//!   the link drops. Subscriptions survive reconnects.

pub mod bus;
pub mod channel;
pub mod message;
pub mod ws;

pub use bus::LocalBus;
pub use channel::SyncChannel;
pub use message::{CommandName, CommandPayload, MessageKind, SyncMessage};
pub use ws::{WsChannel, WsChannelConfig};
