//! WebSocket broadcast relay.
//!
//! Dashboards and display clients all connect to the same endpoint;
//! every valid sync message a peer sends is fanned out verbatim to every
//! connected peer (sender included), which is the entire relay contract.

pub mod handler;
pub mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
