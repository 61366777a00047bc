//! The display runtime state machine.
//!
//! One cooperative event loop owns the whole per-screen state: the
//! resolved playlist, the rotation index, and every named timer
//! (rotation interval, fade, first-run grace, fullscreen retry). All
//! transitions happen on discrete wakeups -- runtime events, sync
//! messages, timer fires -- and each handler runs to completion before
//! the next is processed, so the state needs no locking. Any content
//! re-resolution first cancels the rotation interval and any in-flight
//! fade, which is what makes overlapping timers impossible.
//!
//! Nothing in here is fatal: a failing store resolves to the welcome
//! screen, a failing render parks the display in an error screen until
//! the next successful resolution, and a closed sync channel leaves the
//! rotation running on local timers.

use std::pin::Pin;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::Sleep;

use vitrina_core::gesture::ActivationDetector;
use vitrina_core::{media, rotation};
use vitrina_sync::{CommandName, MessageKind, SyncMessage};

use crate::models::MediaItem;
use crate::persist::ScreenIdFile;
use crate::resolve;
use crate::store::ContentStore;
use crate::surface::DisplaySurface;

/* --------------------------------------------------------------------------
States, events, tunables
-------------------------------------------------------------------------- */

/// The display's externally observable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// No screen id configured yet; first-run setup pending.
    Unconfigured,
    /// Resolving content.
    Loading,
    /// Rotating through a non-empty playlist.
    Playing,
    /// Resolution matched zero items; welcome screen showing.
    Empty,
    /// The current item failed to render; error screen showing until the
    /// next successful resolution.
    Error,
    /// Configuration modal open; rotation paused but not destroyed.
    Configuring,
}

/// External events fed into the runtime (gestures and modal actions come
/// from the surface shell, shutdown from the composition root).
#[derive(Debug)]
pub enum DisplayEvent {
    /// One activation gesture (click/tap) on the glass.
    Gesture,
    /// Operator confirmed a screen in the configuration modal.
    ConfigSave { screen_id: String },
    /// Operator dismissed the configuration modal.
    ConfigCancel,
    /// The surface dropped out of fullscreen.
    FullscreenLost,
    /// Stop the runtime.
    Shutdown,
}

/// Timing knobs, defaulting to the production reference values.
#[derive(Debug, Clone)]
pub struct DisplayTunables {
    /// Time each item stays on the glass.
    pub rotation_interval: Duration,
    /// Cross-fade interval between the outgoing and incoming item.
    pub fade_duration: Duration,
    /// Grace delay before first-run setup opens on an unconfigured
    /// display.
    pub first_run_grace: Duration,
    /// Delay before re-entering fullscreen after it was lost.
    pub fullscreen_retry: Duration,
    /// Gestures required to open configuration.
    pub gestures_required: u8,
    /// Inactivity window between consecutive gestures.
    pub gesture_window: Duration,
}

impl Default for DisplayTunables {
    fn default() -> Self {
        Self {
            rotation_interval: Duration::from_secs(10),
            fade_duration: Duration::from_millis(250),
            first_run_grace: Duration::from_secs(2),
            fullscreen_retry: Duration::from_secs(1),
            gestures_required: vitrina_core::gesture::ACTIVATION_GESTURES,
            gesture_window: vitrina_core::gesture::ACTIVATION_WINDOW,
        }
    }
}

/* --------------------------------------------------------------------------
Handle
-------------------------------------------------------------------------- */

/// Cheap handle for feeding events into a running runtime and observing
/// its state.
#[derive(Clone)]
pub struct DisplayHandle {
    events: mpsc::UnboundedSender<DisplayEvent>,
    state: watch::Receiver<DisplayState>,
}

impl DisplayHandle {
    pub fn gesture(&self) {
        let _ = self.events.send(DisplayEvent::Gesture);
    }

    pub fn save_configuration(&self, screen_id: impl Into<String>) {
        let _ = self.events.send(DisplayEvent::ConfigSave {
            screen_id: screen_id.into(),
        });
    }

    pub fn cancel_configuration(&self) {
        let _ = self.events.send(DisplayEvent::ConfigCancel);
    }

    pub fn fullscreen_lost(&self) {
        let _ = self.events.send(DisplayEvent::FullscreenLost);
    }

    pub fn shutdown(&self) {
        let _ = self.events.send(DisplayEvent::Shutdown);
    }

    /// The runtime's current state.
    pub fn state(&self) -> DisplayState {
        *self.state.borrow()
    }
}

/* --------------------------------------------------------------------------
Runtime
-------------------------------------------------------------------------- */

/// What woke the event loop up.
enum Wake {
    Event(Option<DisplayEvent>),
    Sync(Result<SyncMessage, broadcast::error::RecvError>),
    RotationTick,
    FadeElapsed,
    GraceElapsed,
    FullscreenRetry,
}

/// Await an optional interval; absent means "never fires".
async fn maybe_tick(interval: &mut Option<tokio::time::Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Await an optional one-shot timer; absent means "never fires".
async fn maybe_sleep(slot: &mut Option<Pin<Box<Sleep>>>) {
    match slot {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}

/// The per-screen display runtime.
///
/// Construct with [`new`](Self::new) (or [`spawn`](Self::spawn)) and
/// drive with [`run`](Self::run). Dropping the runtime cancels every
/// timer it owns.
pub struct DisplayRuntime<S, D> {
    store: S,
    surface: D,
    persist: ScreenIdFile,
    tunables: DisplayTunables,

    sync_rx: broadcast::Receiver<SyncMessage>,
    sync_closed: bool,
    events_rx: mpsc::UnboundedReceiver<DisplayEvent>,
    state_tx: watch::Sender<DisplayState>,

    state: DisplayState,
    /// State to restore when the configuration modal is cancelled.
    prior: DisplayState,
    screen_id: Option<String>,
    playlist: Vec<MediaItem>,
    index: usize,
    /// Whether a media element is currently live on the surface (drives
    /// the fade-vs-direct render decision).
    showing: bool,
    detector: ActivationDetector,

    // Named timers. Each is cancelled by replacement or by setting the
    // slot to `None`; a transition that supersedes a timer must clear it
    // so an old timer can never fire into a new state.
    rotation: Option<tokio::time::Interval>,
    fade: Option<Pin<Box<Sleep>>>,
    pending_swap: Option<usize>,
    grace: Option<Pin<Box<Sleep>>>,
    fullscreen_retry: Option<Pin<Box<Sleep>>>,
}

impl<S, D> DisplayRuntime<S, D>
where
    S: ContentStore,
    D: DisplaySurface,
{
    /// Build a runtime around its injected collaborators.
    ///
    /// `sync_rx` comes from `SyncChannel::subscribe()` on whichever
    /// transport the composition root picked.
    pub fn new(
        store: S,
        surface: D,
        persist: ScreenIdFile,
        sync_rx: broadcast::Receiver<SyncMessage>,
        tunables: DisplayTunables,
    ) -> (Self, DisplayHandle) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(DisplayState::Loading);

        let detector = ActivationDetector::new(tunables.gestures_required, tunables.gesture_window);

        let runtime = Self {
            store,
            surface,
            persist,
            tunables,
            sync_rx,
            sync_closed: false,
            events_rx,
            state_tx,
            state: DisplayState::Loading,
            prior: DisplayState::Loading,
            screen_id: None,
            playlist: Vec::new(),
            index: 0,
            showing: false,
            detector,
            rotation: None,
            fade: None,
            pending_swap: None,
            grace: None,
            fullscreen_retry: None,
        };
        let handle = DisplayHandle {
            events: events_tx,
            state: state_rx,
        };
        (runtime, handle)
    }

    /// Spawn the runtime as a background task.
    pub fn spawn(self) -> tokio::task::JoinHandle<()>
    where
        S: 'static,
        D: 'static,
    {
        tokio::spawn(self.run())
    }

    /// Run the event loop until shutdown.
    pub async fn run(mut self) {
        self.startup().await;

        loop {
            let sync_open = !self.sync_closed;
            let wake = {
                let events_rx = &mut self.events_rx;
                let sync_rx = &mut self.sync_rx;
                let rotation = &mut self.rotation;
                let fade = &mut self.fade;
                let grace = &mut self.grace;
                let fullscreen_retry = &mut self.fullscreen_retry;

                tokio::select! {
                    event = events_rx.recv() => Wake::Event(event),
                    message = sync_rx.recv(), if sync_open => Wake::Sync(message),
                    _ = maybe_tick(rotation) => Wake::RotationTick,
                    _ = maybe_sleep(fade) => Wake::FadeElapsed,
                    _ = maybe_sleep(grace) => Wake::GraceElapsed,
                    _ = maybe_sleep(fullscreen_retry) => Wake::FullscreenRetry,
                }
            };

            match wake {
                Wake::Event(None) | Wake::Event(Some(DisplayEvent::Shutdown)) => break,
                Wake::Event(Some(event)) => self.handle_event(event).await,
                Wake::Sync(Ok(message)) => self.handle_sync(message).await,
                Wake::Sync(Err(broadcast::error::RecvError::Lagged(missed))) => {
                    // Best effort: dropped notifications are allowed, and
                    // the next one re-resolves everything anyway.
                    tracing::warn!(missed, "Sync subscriber lagged, messages dropped");
                }
                Wake::Sync(Err(broadcast::error::RecvError::Closed)) => {
                    tracing::warn!("Sync channel closed, continuing on local timers");
                    self.sync_closed = true;
                }
                Wake::RotationTick => self.on_rotation_tick(),
                Wake::FadeElapsed => self.on_fade_elapsed(),
                Wake::GraceElapsed => self.on_grace_elapsed().await,
                Wake::FullscreenRetry => self.on_fullscreen_retry(),
            }
        }

        tracing::info!("Display runtime stopped");
        // Timers, the sync subscription, and the event channel all die
        // with `self` here.
    }

    /* -- startup ---------------------------------------------------------- */

    async fn startup(&mut self) {
        tracing::info!("Display starting");
        self.request_fullscreen();

        match self.persist.load() {
            Some(id) => {
                tracing::info!(screen_id = %id, "Loaded saved screen configuration");
                self.screen_id = Some(id);
                self.set_state(DisplayState::Loading);
                self.resolve_and_apply().await;
            }
            None => {
                // Not an error: a recognized empty state. Give a
                // first-time operator a moment, then open setup.
                tracing::info!("No saved configuration, scheduling first-run setup");
                self.set_state(DisplayState::Unconfigured);
                self.surface.show_welcome();
                self.grace = Some(Box::pin(tokio::time::sleep(self.tunables.first_run_grace)));
            }
        }
    }

    /* -- content resolution ----------------------------------------------- */

    /// Re-resolve content from the store and apply the outcome.
    ///
    /// Cancels the rotation interval and any in-flight fade first so a
    /// re-entrant trigger can never leave two of either alive.
    async fn resolve_and_apply(&mut self) {
        self.rotation = None;
        self.fade = None;
        self.pending_swap = None;

        let Some(screen_id) = self.screen_id.clone() else {
            self.set_state(DisplayState::Unconfigured);
            self.showing = false;
            self.surface.show_welcome();
            return;
        };

        let playlist = match resolve::resolve_content(&self.store, &screen_id).await {
            Ok(playlist) => playlist,
            Err(e) => {
                // Fail safe: an unreadable store is "no content", never a
                // raw fault on an unattended screen.
                tracing::warn!(error = %e, "Store read failed, treating as empty content");
                Vec::new()
            }
        };

        if self.state == DisplayState::Configuring {
            // Keep the modal open and the rotation paused; remember what
            // to resume into if the operator cancels.
            self.playlist = playlist;
            self.index = 0;
            self.showing = false;
            self.prior = if self.playlist.is_empty() {
                DisplayState::Empty
            } else {
                DisplayState::Playing
            };
            return;
        }

        self.apply_playlist(playlist);
    }

    fn apply_playlist(&mut self, playlist: Vec<MediaItem>) {
        self.playlist = playlist;
        self.index = 0;

        if self.playlist.is_empty() {
            tracing::info!("No content matched, showing welcome screen");
            self.set_state(DisplayState::Empty);
            self.showing = false;
            self.surface.show_welcome();
        } else {
            tracing::info!(count = self.playlist.len(), "Content resolved");
            self.set_state(DisplayState::Playing);
            self.begin_show(0);
            self.start_rotation();
        }
    }

    /* -- rendering and rotation ------------------------------------------- */

    fn start_rotation(&mut self) {
        let period = self.tunables.rotation_interval;
        // `interval_at`: the first tick must come one full period from
        // now, not immediately.
        self.rotation = Some(tokio::time::interval_at(
            tokio::time::Instant::now() + period,
            period,
        ));
    }

    /// Put the item at `index` on the glass, cross-fading when something
    /// is already showing.
    fn begin_show(&mut self, index: usize) {
        self.index = index;
        if self.showing {
            self.surface.fade_out();
            self.pending_swap = Some(index);
            self.fade = Some(Box::pin(tokio::time::sleep(self.tunables.fade_duration)));
        } else {
            self.finish_show(index);
        }
    }

    fn finish_show(&mut self, index: usize) {
        let Some(item) = self.playlist.get(index).cloned() else {
            return;
        };

        // Unsupported types are skipped, not fatal: the rotation loop
        // keeps going and the next tick tries the next item.
        if !media::is_supported_type(&item.content_type) {
            tracing::warn!(id = %item.id, content_type = %item.content_type, "Skipping unsupported media type");
            return;
        }

        match self.surface.show_media(&item) {
            Ok(()) => {
                self.showing = true;
            }
            Err(e) => {
                tracing::error!(id = %item.id, error = %e, "Render failed");
                self.enter_error(&format!("Error rendering '{}'", item.name));
            }
        }
    }

    fn on_rotation_tick(&mut self) {
        if self.state != DisplayState::Playing || self.playlist.is_empty() {
            return;
        }
        let next = rotation::advance(self.index, self.playlist.len());
        self.begin_show(next);
    }

    fn on_fade_elapsed(&mut self) {
        self.fade = None;
        if let Some(index) = self.pending_swap.take() {
            self.finish_show(index);
        }
    }

    /// Park in the error screen until the next successful resolution.
    fn enter_error(&mut self, message: &str) {
        self.rotation = None;
        self.fade = None;
        self.pending_swap = None;
        self.showing = false;
        self.set_state(DisplayState::Error);
        self.surface.show_error(message);
    }

    /* -- sync events ------------------------------------------------------ */

    async fn handle_sync(&mut self, message: SyncMessage) {
        match message.kind {
            MessageKind::MediaUpdated => {
                tracing::info!("Media updated, re-resolving content");
                self.resolve_and_apply().await;
            }
            // Unconditional on purpose: this also covers our own
            // screen's folder assignment changing, and the re-read is
            // cheap.
            MessageKind::ScreenUpdated => {
                tracing::info!("Screen updated, re-resolving content");
                self.resolve_and_apply().await;
            }
            MessageKind::DisplayCommand => self.handle_command(message).await,
            MessageKind::PlaylistUpdated | MessageKind::Heartbeat | MessageKind::Unknown => {
                tracing::trace!(kind = ?message.kind, "Ignoring sync message");
            }
        }
    }

    async fn handle_command(&mut self, message: SyncMessage) {
        let payload = match message.command_payload() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Dropping malformed display command");
                return;
            }
        };

        if self.screen_id.as_deref() != Some(payload.screen_id.as_str()) {
            tracing::trace!(target = %payload.screen_id, "Command addressed to another screen");
            return;
        }

        tracing::info!(command = ?payload.command, "Received display command");
        match payload.command {
            CommandName::ReloadContent => self.resolve_and_apply().await,
            CommandName::NextContent => {
                if self.state == DisplayState::Playing && !self.playlist.is_empty() {
                    let next = rotation::advance(self.index, self.playlist.len());
                    self.begin_show(next);
                }
            }
            CommandName::EnterFullscreen => self.request_fullscreen(),
            CommandName::Unknown => {
                tracing::debug!("Ignoring unknown display command");
            }
        }
    }

    /* -- runtime events --------------------------------------------------- */

    async fn handle_event(&mut self, event: DisplayEvent) {
        match event {
            DisplayEvent::Gesture => {
                // Tokio's clock, so gestures and the runtime's timers
                // share one time source.
                let now = tokio::time::Instant::now().into_std();
                if self.detector.register(now) {
                    self.enter_configuring().await;
                }
            }
            DisplayEvent::ConfigSave { screen_id } => self.save_configuration(screen_id).await,
            DisplayEvent::ConfigCancel => self.cancel_configuring(),
            DisplayEvent::FullscreenLost => {
                tracing::debug!("Fullscreen lost, scheduling re-entry");
                self.fullscreen_retry =
                    Some(Box::pin(tokio::time::sleep(self.tunables.fullscreen_retry)));
            }
            // Handled by the run loop; nothing to do here.
            DisplayEvent::Shutdown => {}
        }
    }

    /// Open the configuration modal, pausing (not destroying) playback.
    async fn enter_configuring(&mut self) {
        if self.state == DisplayState::Configuring {
            return;
        }

        self.prior = self.state;
        self.rotation = None;
        self.fade = None;
        self.pending_swap = None;
        self.grace = None;
        self.set_state(DisplayState::Configuring);

        let screens = match self.store.list_screens().await {
            Ok(screens) => screens,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load screens for configuration");
                Vec::new()
            }
        };
        tracing::info!(count = screens.len(), "Opening configuration modal");
        self.surface.show_config(&screens, self.screen_id.as_deref());
    }

    async fn save_configuration(&mut self, screen_id: String) {
        if self.state != DisplayState::Configuring {
            tracing::debug!("Ignoring configuration save outside configuration mode");
            return;
        }

        if let Err(e) = self.persist.save(&screen_id) {
            // The in-memory configuration still takes effect; only the
            // next restart loses it.
            tracing::warn!(error = %e, "Failed to persist screen configuration");
        }
        tracing::info!(screen_id = %screen_id, "Screen configuration saved");

        self.screen_id = Some(screen_id);
        self.surface.hide_config();
        self.detector.reset();
        self.set_state(DisplayState::Loading);
        self.resolve_and_apply().await;
    }

    /// Dismiss the modal without persisting; resume the prior state.
    fn cancel_configuring(&mut self) {
        if self.state != DisplayState::Configuring {
            return;
        }

        tracing::info!("Configuration cancelled");
        self.surface.hide_config();
        self.detector.reset();

        let prior = self.prior;
        self.set_state(prior);
        if prior == DisplayState::Playing && !self.playlist.is_empty() {
            // The content is still on the glass; just restart the clock.
            self.start_rotation();
        }
    }

    /* -- fullscreen ------------------------------------------------------- */

    fn request_fullscreen(&mut self) {
        if let Err(e) = self.surface.enter_fullscreen() {
            tracing::warn!(error = %e, "Could not enter fullscreen");
        }
    }

    async fn on_grace_elapsed(&mut self) {
        self.grace = None;
        if self.state == DisplayState::Unconfigured {
            self.enter_configuring().await;
        }
    }

    fn on_fullscreen_retry(&mut self) {
        self.fullscreen_retry = None;
        self.request_fullscreen();
    }

    /* -- helpers ---------------------------------------------------------- */

    fn set_state(&mut self, state: DisplayState) {
        if self.state != state {
            tracing::debug!(from = ?self.state, to = ?state, "State transition");
        }
        self.state = state;
        let _ = self.state_tx.send(state);
    }
}
