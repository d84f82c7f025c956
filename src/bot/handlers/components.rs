//! Button and modal handlers for the panel.
//!
//! "Go AFK" opens the modal, the modal submit enters AFK, and "I'm back" exits.
//! Replies are ephemeral. Work that touches the panel is deferred first so the
//! interaction is acknowledged within Discord's deadline.

use crate::{
    bot::{
        BotData, reply_text,
        ui::{
            DURATION_INPUT_ID, ENTER_BUTTON_ID, EXIT_BUTTON_ID, MODAL_ID, REASON_INPUT_ID,
            afk_modal, display_tag, modal_value,
        },
    },
    core::command::Command,
    errors::Result,
};
use poise::serenity_prelude as serenity;
use tracing::{debug, error};

const FAILURE_TEXT: &str = "❌ Something went wrong, please try again.";

/// Handles a press on one of the panel's buttons.
pub async fn handle_component(
    ctx: &serenity::Context,
    data: &BotData,
    component: &serenity::ComponentInteraction,
) -> Result<()> {
    match component.data.custom_id.as_str() {
        ENTER_BUTTON_ID => {
            component
                .create_response(&ctx.http, serenity::CreateInteractionResponse::Modal(afk_modal()))
                .await?;
        }
        EXIT_BUTTON_ID => {
            component.defer_ephemeral(&ctx.http).await?;
            let result = data
                .dispatch(Command::ExitAfk {
                    user_id: component.user.id.get(),
                })
                .await;
            let text = reply_text(result).unwrap_or_else(|e| {
                error!("Exit AFK failed for {}: {}", component.user.id, e);
                FAILURE_TEXT.to_string()
            });
            component
                .edit_response(&ctx.http, serenity::EditInteractionResponse::new().content(text))
                .await?;
        }
        other => debug!("Ignoring component interaction '{}'", other),
    }
    Ok(())
}

/// Handles the AFK modal submission.
pub async fn handle_modal(
    ctx: &serenity::Context,
    data: &BotData,
    modal: &serenity::ModalInteraction,
) -> Result<()> {
    if modal.data.custom_id != MODAL_ID {
        debug!("Ignoring modal '{}'", modal.data.custom_id);
        return Ok(());
    }

    modal.defer_ephemeral(&ctx.http).await?;

    let command = Command::EnterAfk {
        user_id: modal.user.id.get(),
        display_tag: display_tag(&modal.user),
        reason: modal_value(modal, REASON_INPUT_ID).unwrap_or_default(),
        duration: modal_value(modal, DURATION_INPUT_ID).unwrap_or_default(),
    };
    let text = reply_text(data.dispatch(command).await).unwrap_or_else(|e| {
        error!("Enter AFK failed for {}: {}", modal.user.id, e);
        FAILURE_TEXT.to_string()
    });

    modal
        .edit_response(&ctx.http, serenity::EditInteractionResponse::new().content(text))
        .await?;
    Ok(())
}
