//! Serenity-backed display surface.

use crate::{
    bot::ui::{panel_buttons, panel_embed},
    core::{
        panel::PanelContent,
        surface::{DisplaySurface, SurfaceError},
    },
};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Publishes the panel through the Discord HTTP API.
pub struct SerenityDisplay {
    http: Arc<serenity::Http>,
}

impl SerenityDisplay {
    /// Wraps a shared HTTP client.
    #[must_use]
    pub const fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl DisplaySurface for SerenityDisplay {
    async fn edit_panel(
        &self,
        channel_id: u64,
        message_id: u64,
        content: &PanelContent,
    ) -> Result<(), SurfaceError> {
        let builder = serenity::EditMessage::new()
            .embed(panel_embed(content))
            .components(panel_buttons());

        serenity::ChannelId::new(channel_id)
            .edit_message(&self.http, serenity::MessageId::new(message_id), builder)
            .await
            .map(|_| ())
            .map_err(classify)
    }

    async fn post_panel(
        &self,
        channel_id: u64,
        content: &PanelContent,
    ) -> Result<u64, SurfaceError> {
        let builder = serenity::CreateMessage::new()
            .embed(panel_embed(content))
            .components(panel_buttons());

        serenity::ChannelId::new(channel_id)
            .send_message(&self.http, builder)
            .await
            .map(|message| message.id.get())
            .map_err(classify)
    }
}

// 403/404 mean the message or channel is gone or off-limits; anything else
// may succeed on the next tick.
fn classify(error: serenity::Error) -> SurfaceError {
    if let serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response)) = &error {
        if is_gone_status(response.status_code.as_u16()) {
            return SurfaceError::Gone(error.to_string());
        }
    }
    SurfaceError::Unavailable(error.to_string())
}

const fn is_gone_status(status: u16) -> bool {
    matches!(status, 403 | 404)
}
