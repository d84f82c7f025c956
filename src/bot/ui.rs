//! Discord UI builders for the panel: embed, buttons, and the AFK modal.

use crate::core::{panel::PanelContent, registry::MAX_REASON_CHARS};
use poise::serenity_prelude as serenity;

/// Custom id of the "Go AFK" button.
pub const ENTER_BUTTON_ID: &str = "afk:enter";
/// Custom id of the "I'm back" button.
pub const EXIT_BUTTON_ID: &str = "afk:exit";
/// Custom id of the AFK modal.
pub const MODAL_ID: &str = "afk:modal";
/// Custom id of the modal's reason input.
pub const REASON_INPUT_ID: &str = "reason";
/// Custom id of the modal's duration input.
pub const DURATION_INPUT_ID: &str = "duration";

/// Builds the panel embed.
#[must_use]
pub fn panel_embed(content: &PanelContent) -> serenity::CreateEmbed {
    let embed = serenity::CreateEmbed::new()
        .title(&content.title)
        .description(&content.description)
        .colour(content.colour);

    match &content.thumbnail_url {
        Some(url) => embed.thumbnail(url),
        None => embed,
    }
}

/// The two buttons attached to every panel message.
#[must_use]
pub fn panel_buttons() -> Vec<serenity::CreateActionRow> {
    vec![serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(ENTER_BUTTON_ID)
            .label("Go AFK")
            .style(serenity::ButtonStyle::Danger),
        serenity::CreateButton::new(EXIT_BUTTON_ID)
            .label("I'm back")
            .style(serenity::ButtonStyle::Success),
    ])]
}

/// The modal collecting reason and duration.
#[must_use]
pub fn afk_modal() -> serenity::CreateModal {
    let reason_limit = u16::try_from(MAX_REASON_CHARS).unwrap_or(u16::MAX);

    serenity::CreateModal::new(MODAL_ID, "Going AFK").components(vec![
        serenity::CreateActionRow::InputText(
            serenity::CreateInputText::new(serenity::InputTextStyle::Short, "Reason", REASON_INPUT_ID)
                .placeholder("e.g. cooking dinner")
                .max_length(reason_limit)
                .required(true),
        ),
        serenity::CreateActionRow::InputText(
            serenity::CreateInputText::new(
                serenity::InputTextStyle::Short,
                "For how long? (minutes or H:MM)",
                DURATION_INPUT_ID,
            )
            .placeholder("e.g. 15")
            .max_length(10)
            .required(true),
        ),
    ])
}

/// Reads a text input's value out of a submitted modal.
#[must_use]
pub fn modal_value(modal: &serenity::ModalInteraction, custom_id: &str) -> Option<String> {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            serenity::ActionRowComponent::InputText(input) if input.custom_id == custom_id => {
                input.value.clone()
            }
            _ => None,
        })
}

/// Panel label for a user.
#[must_use]
pub fn display_tag(user: &serenity::User) -> String {
    format!("<@{}>", user.id)
}
