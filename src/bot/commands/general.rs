//! General Discord commands - ping and help.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command, ephemeral)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**AFK Panel Help**\n\
        Use the buttons on the AFK panel, or the commands below.\n\n\
        **AFK Commands**\n\
        • `/afk <reason> <duration>` - Marks you AFK. Duration is minutes (`15`) or `H:MM` (`1:30`).\n\
        • `/back` - Clears your AFK status.\n\
        • `/afkstats` - Lists who is AFK (only visible to you).\n\n\
        **Admin Commands**\n\
        • `/afkpanel` - Posts the live AFK panel in this channel (requires Manage Server).\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
