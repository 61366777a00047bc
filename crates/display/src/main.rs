use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrina_display::config::DisplayConfig;
use vitrina_display::{
    DisplayRuntime, DisplayTunables, HeadlessSurface, HttpContentStore, ScreenIdFile,
};
use vitrina_sync::{SyncChannel, WsChannel, WsChannelConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrina_display=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = DisplayConfig::from_env();
    tracing::info!(api_url = %config.api_url, ws_url = %config.ws_url, "Loaded display configuration");

    // --- Collaborators ---
    let store = HttpContentStore::new(&config.api_url);
    let persist = ScreenIdFile::new(&config.screen_id_path);
    let surface = HeadlessSurface;

    let channel = WsChannel::connect(WsChannelConfig {
        url: config.ws_url.clone(),
        reconnect_interval: config.reconnect_interval,
    });

    // --- Runtime ---
    let (runtime, handle) = DisplayRuntime::new(
        store,
        surface,
        persist,
        channel.subscribe(),
        DisplayTunables::default(),
    );
    let runtime_task = runtime.spawn();

    // --- Run until SIGINT ---
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl-C handler");
    tracing::info!("Received SIGINT (Ctrl-C), shutting down display");

    handle.shutdown();
    channel.shutdown();
    let _ = tokio::time::timeout(Duration::from_secs(5), runtime_task).await;

    tracing::info!("Display shut down");
}
