//! The rendering collaborator boundary.
//!
//! The runtime decides *what* is on the glass; a [`DisplaySurface`]
//! implementation decides *how* it gets there (a browser shell, a video
//! plane, a kiosk compositor). The runtime only ever holds one live
//! media element: `show_media` fully replaces whatever was showing.

use crate::models::{MediaItem, Screen};

/// Errors a surface can raise.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// The current item could not be decoded or presented.
    #[error("Render failed: {0}")]
    Render(String),

    /// Exclusive fullscreen could not be entered.
    #[error("Fullscreen unavailable: {0}")]
    Fullscreen(String),
}

/// Operations the runtime drives on the glass.
pub trait DisplaySurface: Send {
    /// Replace the live media element with this item.
    fn show_media(&mut self, item: &MediaItem) -> Result<(), SurfaceError>;

    /// Mark the live element for fade-out; the runtime swaps the next
    /// item in after the fade interval.
    fn fade_out(&mut self);

    /// Show the welcome/fallback screen (no content, not configured).
    fn show_welcome(&mut self);

    /// Show a human-readable error screen.
    fn show_error(&mut self, message: &str);

    /// Open the configuration modal with the selectable screens.
    fn show_config(&mut self, screens: &[Screen], current: Option<&str>);

    /// Close the configuration modal.
    fn hide_config(&mut self);

    /// Request exclusive fullscreen presentation.
    fn enter_fullscreen(&mut self) -> Result<(), SurfaceError>;
}

/// Surface that only logs -- the binary's default until a real shell is
/// attached, and handy for soak-testing the runtime itself.
#[derive(Default)]
pub struct HeadlessSurface;

impl DisplaySurface for HeadlessSurface {
    fn show_media(&mut self, item: &MediaItem) -> Result<(), SurfaceError> {
        tracing::info!(id = %item.id, name = %item.name, content_type = %item.content_type, "Showing media");
        Ok(())
    }

    fn fade_out(&mut self) {
        tracing::debug!("Fading out current media");
    }

    fn show_welcome(&mut self) {
        tracing::info!("Showing welcome screen");
    }

    fn show_error(&mut self, message: &str) {
        tracing::error!(message, "Showing error screen");
    }

    fn show_config(&mut self, screens: &[Screen], current: Option<&str>) {
        tracing::info!(count = screens.len(), current = ?current, "Showing configuration modal");
    }

    fn hide_config(&mut self) {
        tracing::info!("Hiding configuration modal");
    }

    fn enter_fullscreen(&mut self) -> Result<(), SurfaceError> {
        tracing::info!("Entering fullscreen");
        Ok(())
    }
}
