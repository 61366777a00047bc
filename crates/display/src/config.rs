use std::path::PathBuf;
use std::time::Duration;

/// Display client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Content store base URL (default: `http://localhost:3001`).
    pub api_url: String,
    /// Sync relay endpoint (default: `ws://localhost:3001/api/v1/ws`).
    pub ws_url: String,
    /// Path of the persisted screen-id file (default: `display_screen_id`).
    pub screen_id_path: PathBuf,
    /// Delay between relay reconnect attempts (default: 5 s).
    pub reconnect_interval: Duration,
}

impl DisplayConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                        |
    /// |--------------------------|--------------------------------|
    /// | `API_URL`                | `http://localhost:3001`        |
    /// | `WS_URL`                 | `ws://localhost:3001/api/v1/ws`|
    /// | `DISPLAY_CONFIG_PATH`    | `display_screen_id`            |
    /// | `RECONNECT_INTERVAL_SECS`| `5`                            |
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:3001".into());

        let ws_url =
            std::env::var("WS_URL").unwrap_or_else(|_| "ws://localhost:3001/api/v1/ws".into());

        let screen_id_path = PathBuf::from(
            std::env::var("DISPLAY_CONFIG_PATH").unwrap_or_else(|_| "display_screen_id".into()),
        );

        let reconnect_secs: u64 = std::env::var("RECONNECT_INTERVAL_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("RECONNECT_INTERVAL_SECS must be a valid u64");

        Self {
            api_url,
            ws_url,
            screen_id_path,
            reconnect_interval: Duration::from_secs(reconnect_secs),
        }
    }
}
