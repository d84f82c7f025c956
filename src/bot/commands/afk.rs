//! AFK Discord commands - `afk` and `back`.
//!
//! Typed alternatives to the panel's buttons; they go through the same
//! dispatch path and refresh the panel the same way.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, reply_text, ui::display_tag},
        core::command::Command,
        errors::Result,
    };

    /// Marks you as AFK.
    ///
    /// Going AFK again replaces your previous entry and restarts the timer.
    #[poise::command(slash_command, ephemeral)]
    pub async fn afk(
        ctx: Context<'_>,
        #[description = "Why you are away"]
        #[max_length = 100]
        reason: String,
        #[description = "Minutes (e.g. 15) or H:MM (e.g. 1:30)"] duration: String,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let result = ctx
            .data()
            .dispatch(Command::EnterAfk {
                user_id: ctx.author().id.get(),
                display_tag: display_tag(ctx.author()),
                reason,
                duration,
            })
            .await;
        ctx.say(reply_text(result)?).await?;
        Ok(())
    }

    /// Clears your AFK status.
    #[poise::command(slash_command, prefix_command, ephemeral)]
    pub async fn back(ctx: Context<'_>) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let result = ctx
            .data()
            .dispatch(Command::ExitAfk {
                user_id: ctx.author().id.get(),
            })
            .await;
        ctx.say(reply_text(result)?).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
