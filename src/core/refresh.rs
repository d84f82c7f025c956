//! Panel refresh - the evict, render, publish cycle.
//!
//! A cycle runs on every tick of the refresh loop and out-of-cycle after any
//! user action. The panel location is held under a lock for the whole publish
//! step, so overlapping cycles cannot both post a replacement message.

use crate::core::{
    panel::{PanelStyle, render},
    store,
    surface::{DisplaySurface, PanelLocation, SurfaceError},
    tracker::AfkTracker,
};
use chrono::{DateTime, Utc};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::{sync::Mutex, time::MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

/// What a single refresh cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// No panel has been bound to a channel yet
    NoPanel,
    /// The existing panel message was updated in place
    Edited,
    /// A new panel message was posted
    Posted {
        /// Id of the new message
        message_id: u64,
    },
    /// Publishing failed; the next tick retries
    Failed,
}

/// Owns the panel location and publishes rendered panels.
#[derive(Debug)]
pub struct PanelRefresher {
    location: Mutex<Option<PanelLocation>>,
    panel_path: Option<PathBuf>,
    style: PanelStyle,
}

impl PanelRefresher {
    /// Creates a refresher with a known location (or none).
    #[must_use]
    pub fn new(location: Option<PanelLocation>, panel_path: Option<PathBuf>, style: PanelStyle) -> Self {
        Self {
            location: Mutex::new(location),
            panel_path,
            style,
        }
    }

    /// Creates a refresher from the panel file at `panel_path`.
    pub async fn load(panel_path: PathBuf, style: PanelStyle) -> Self {
        let location = store::load_panel(&panel_path).await;
        if let Some(loc) = &location {
            info!("Restored panel location: channel {}", loc.channel_id);
        }
        Self::new(location, Some(panel_path), style)
    }

    /// Presentation settings used when rendering.
    #[must_use]
    pub const fn style(&self) -> &PanelStyle {
        &self.style
    }

    /// Current panel location.
    pub async fn location(&self) -> Option<PanelLocation> {
        *self.location.lock().await
    }

    /// Binds the panel to `channel_id` and forgets the previous message, so the
    /// next cycle posts a fresh panel. The old message is left untouched.
    #[instrument(skip(self))]
    pub async fn bind(&self, channel_id: u64) {
        let mut location = self.location.lock().await;
        let bound = PanelLocation::unposted(channel_id);
        *location = Some(bound);
        self.persist(&bound).await;
        info!("Panel bound to channel {}", channel_id);
    }

    /// Runs one cycle: evict expired entries, render, and publish.
    pub async fn refresh(
        &self,
        tracker: &AfkTracker,
        surface: &dyn DisplaySurface,
        now: DateTime<Utc>,
    ) -> RefreshOutcome {
        let mut location = self.location.lock().await;
        let records = tracker.snapshot(now).await;

        let Some(current) = *location else {
            return RefreshOutcome::NoPanel;
        };
        let content = render(&records, now, &self.style);

        if let Some(message_id) = current.message_id {
            match surface
                .edit_panel(current.channel_id, message_id, &content)
                .await
            {
                Ok(()) => return RefreshOutcome::Edited,
                Err(SurfaceError::Gone(e)) => {
                    warn!("Panel message {} is gone, posting a new one: {}", message_id, e);
                }
                Err(e @ SurfaceError::Unavailable(_)) => {
                    warn!("Failed to update panel: {}", e);
                    return RefreshOutcome::Failed;
                }
            }
        }

        match surface.post_panel(current.channel_id, &content).await {
            Ok(message_id) => {
                let posted = PanelLocation {
                    channel_id: current.channel_id,
                    message_id: Some(message_id),
                };
                *location = Some(posted);
                self.persist(&posted).await;
                info!(
                    "Posted panel message {} in channel {}",
                    message_id, current.channel_id
                );
                RefreshOutcome::Posted { message_id }
            }
            Err(e) => {
                warn!("Failed to post panel in channel {}: {}", current.channel_id, e);
                RefreshOutcome::Failed
            }
        }
    }

    /// Refreshes every `period` until the process exits.
    pub async fn run(
        self: Arc<Self>,
        tracker: Arc<AfkTracker>,
        surface: Arc<dyn DisplaySurface>,
        period: Duration,
    ) {
        info!("Starting panel refresh loop every {:?}", period);
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let outcome = self.refresh(&tracker, surface.as_ref(), Utc::now()).await;
            debug!("Refresh tick: {:?}", outcome);
        }
    }

    async fn persist(&self, location: &PanelLocation) {
        let Some(path) = &self.panel_path else {
            return;
        };
        if let Err(e) = store::save_panel(path, location).await {
            warn!("Failed to save panel location to {:?}: {}", path, e);
        }
    }
}
