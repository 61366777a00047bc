//! Vitrina display client.
//!
//! The per-screen runtime that keeps an unattended display rendering
//! indefinitely: it resolves "what to show" from the content store,
//! rotates through the resolved playlist, reacts to sync notifications
//! and targeted commands, heals lost fullscreen, and hides a
//! five-gesture configuration entry point behind the glass.
//!
//! Rendering itself is a collaborator behind [`DisplaySurface`]; the
//! store is a collaborator behind [`ContentStore`]; the sync channel is
//! whatever [`vitrina_sync::SyncChannel`] the composition root picked.

pub mod config;
pub mod models;
pub mod persist;
pub mod resolve;
pub mod runtime;
pub mod store;
pub mod surface;

pub use models::{MediaItem, Screen};
pub use persist::ScreenIdFile;
pub use runtime::{DisplayHandle, DisplayRuntime, DisplayState, DisplayTunables};
pub use store::{ContentStore, HttpContentStore, StoreError};
pub use surface::{DisplaySurface, HeadlessSurface, SurfaceError};
