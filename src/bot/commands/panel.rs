//! Panel Discord commands - `afkpanel` and `afkstats`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, reply_text},
        core::command::Command,
        errors::Result,
    };
    use tracing::info;

    /// Posts the AFK panel in this channel.
    ///
    /// Binds the panel to the current channel and posts a fresh message. The
    /// previous panel message, if any, is left as it is and no longer updated.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        ephemeral,
        required_permissions = "MANAGE_GUILD",
        default_member_permissions = "MANAGE_GUILD"
    )]
    pub async fn afkpanel(ctx: Context<'_>) -> Result<()> {
        ctx.defer_ephemeral().await?;

        let channel_id = ctx.channel_id();
        info!("{} requested a panel in channel {}", ctx.author().name, channel_id);

        let result = ctx
            .data()
            .dispatch(Command::InitPanel {
                channel_id: channel_id.get(),
            })
            .await;
        ctx.say(reply_text(result)?).await?;
        Ok(())
    }

    /// Shows how many people are AFK and why.
    ///
    /// The listing is only visible to you. Prefix replies cannot be hidden,
    /// so this is a slash command only.
    #[poise::command(slash_command, ephemeral)]
    pub async fn afkstats(ctx: Context<'_>) -> Result<()> {
        let result = ctx.data().dispatch(Command::ShowStats).await;
        ctx.say(reply_text(result)?).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
