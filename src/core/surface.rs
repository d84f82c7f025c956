//! Display surface abstraction - where the panel gets published.
//!
//! The refresh loop only knows this trait, so it can be driven by the Discord
//! HTTP client in production and by a recording fake in tests.

use crate::core::panel::PanelContent;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where the panel lives: a channel, and the message in it once posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelLocation {
    /// Channel the panel is bound to
    pub channel_id: u64,
    /// Message currently showing the panel, if one has been posted
    pub message_id: Option<u64>,
}

impl PanelLocation {
    /// A location bound to `channel_id` with no message posted yet.
    #[must_use]
    pub const fn unposted(channel_id: u64) -> Self {
        Self {
            channel_id,
            message_id: None,
        }
    }
}

/// Failure to publish to the display surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The message or channel no longer exists or cannot be edited
    #[error("panel message is gone or not editable: {0}")]
    Gone(String),
    /// Transient failure, worth retrying on the next tick
    #[error("display surface unavailable: {0}")]
    Unavailable(String),
}

/// Outbound operations the refresh loop needs.
#[async_trait]
pub trait DisplaySurface: Send + Sync {
    /// Replaces the content of an existing panel message.
    async fn edit_panel(
        &self,
        channel_id: u64,
        message_id: u64,
        content: &PanelContent,
    ) -> Result<(), SurfaceError>;

    /// Posts a new panel message and returns its id.
    async fn post_panel(&self, channel_id: u64, content: &PanelContent)
    -> Result<u64, SurfaceError>;
}
