//! Sync wire messages.
//!
//! Every message on the channel is a JSON envelope:
//!
//! ```json
//! { "type": "media_updated", "data": { ... }, "timestamp": 1722945600000 }
//! ```
//!
//! `data` stays a free-form JSON object for the notification kinds (the
//! payload is advisory; receivers re-read the store rather than trusting
//! it), and is a typed [`CommandPayload`] for `display_command`.
//! Unrecognized message types and command names deserialize to `Unknown`
//! so old clients tolerate newer peers.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Discriminator for [`SyncMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    MediaUpdated,
    ScreenUpdated,
    PlaylistUpdated,
    DisplayCommand,
    Heartbeat,
    /// Forward compatibility: any type this build doesn't know.
    #[serde(other)]
    Unknown,
}

/// A message on the sync channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default)]
    pub data: serde_json::Value,
    /// Publish time in Unix milliseconds.
    pub timestamp: i64,
}

/// Command names a dashboard can send to a specific display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandName {
    ReloadContent,
    NextContent,
    EnterFullscreen,
    /// Forward compatibility: unknown commands are silent no-ops.
    #[serde(other)]
    Unknown,
}

/// Payload of a `display_command` message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandPayload {
    /// Target screen; every other display ignores the command.
    pub screen_id: String,
    pub command: CommandName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    /// Issue time in Unix milliseconds.
    pub timestamp: i64,
}

impl SyncMessage {
    /// Build a message of the given kind, stamped now.
    pub fn new(kind: MessageKind, data: serde_json::Value) -> Self {
        Self {
            kind,
            data,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Notification that a media item was added, changed, or removed.
    pub fn media_updated(data: serde_json::Value) -> Self {
        Self::new(MessageKind::MediaUpdated, data)
    }

    /// Notification that a screen was added, changed, or removed.
    pub fn screen_updated(data: serde_json::Value) -> Self {
        Self::new(MessageKind::ScreenUpdated, data)
    }

    /// Command addressed to one display.
    pub fn display_command(
        screen_id: impl Into<String>,
        command: CommandName,
        params: Option<serde_json::Value>,
    ) -> Self {
        let payload = CommandPayload {
            screen_id: screen_id.into(),
            command,
            params,
            timestamp: Utc::now().timestamp_millis(),
        };
        // CommandPayload serialization cannot fail: it is a plain struct
        // of JSON-representable fields.
        let data = serde_json::to_value(payload).unwrap_or_default();
        Self::new(MessageKind::DisplayCommand, data)
    }

    /// Parse the `data` object of a `display_command` message.
    pub fn command_payload(&self) -> Result<CommandPayload, serde_json::Error> {
        serde_json::from_value(self.data.clone())
    }
}
