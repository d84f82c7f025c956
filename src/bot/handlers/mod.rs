//! Discord interaction handlers
//!
//! This module provides handlers for interactions that are not slash commands:
//! the panel's buttons and the AFK modal.

/// Button and modal handlers for the panel
pub mod components;

use crate::{bot::BotData, errors::Error};
use poise::serenity_prelude as serenity;

/// Routes gateway events that poise does not handle itself.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<(), Error> {
    if let serenity::FullEvent::InteractionCreate { interaction } = event {
        match interaction {
            serenity::Interaction::Component(component) => {
                components::handle_component(ctx, data, component).await?;
            }
            serenity::Interaction::Modal(modal) => {
                components::handle_modal(ctx, data, modal).await?;
            }
            _ => {}
        }
    }
    Ok(())
}
