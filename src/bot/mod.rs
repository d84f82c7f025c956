//! Bot layer - Discord-specific interface and command handlers
//!
//! This module wires the poise framework to the core: slash and prefix
//! commands, button and modal handlers, and the serenity-backed display surface.

/// Discord command implementations (panel, afk, general)
pub mod commands;
/// Discord interaction handlers (buttons, modals)
pub mod handlers;
/// Serenity-backed display surface
pub mod surface;
/// Embed, button, and modal builders
pub mod ui;

use crate::{
    config::AppConfig,
    core::{
        command::{Command, Reply, dispatch},
        refresh::PanelRefresher,
        surface::DisplaySurface,
        tracker::AfkTracker,
    },
    errors::{Error, Result},
};
use chrono::Utc;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Shared data available to all bot commands and handlers.
pub struct BotData {
    /// AFK state
    pub tracker: Arc<AfkTracker>,
    /// Panel location and publisher
    pub refresher: Arc<PanelRefresher>,
    /// Where the panel is published
    pub surface: Arc<dyn DisplaySurface>,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub fn new(
        tracker: Arc<AfkTracker>,
        refresher: Arc<PanelRefresher>,
        surface: Arc<dyn DisplaySurface>,
    ) -> Self {
        Self {
            tracker,
            refresher,
            surface,
        }
    }

    /// Runs a command against the shared state at the current time.
    pub async fn dispatch(&self, command: Command) -> Result<Reply> {
        dispatch(
            &self.tracker,
            &self.refresher,
            self.surface.as_ref(),
            command,
            Utc::now(),
        )
        .await
    }
}

/// Poise context alias used by all commands.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Turns a dispatch result into the private reply text.
///
/// Validation failures become a user-facing message; anything else is passed
/// up to the caller's error handling.
pub fn reply_text(result: Result<Reply>) -> Result<String> {
    match result {
        Ok(reply) => Ok(reply.message()),
        Err(e) if e.is_validation() => Ok(format!("❌ {e}")),
        Err(e) => Err(e),
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say("❌ Something went wrong, please try again.").await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Starts the Discord client and the panel refresh loop. Runs until the
/// gateway connection ends.
#[instrument(skip_all)]
pub async fn run_bot(
    token: &str,
    app_config: Arc<AppConfig>,
    tracker: Arc<AfkTracker>,
    refresher: Arc<PanelRefresher>,
) -> Result<()> {
    let refresh_interval = app_config.refresh_interval();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::afkpanel(),
                commands::afkstats(),
                commands::afk(),
                commands::back(),
                commands::ping(),
                commands::help(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some("!".into()),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                let surface: Arc<dyn DisplaySurface> =
                    Arc::new(surface::SerenityDisplay::new(Arc::clone(&ctx.http)));
                tokio::spawn(Arc::clone(&refresher).run(
                    Arc::clone(&tracker),
                    Arc::clone(&surface),
                    refresh_interval,
                ));

                Ok(BotData::new(tracker, refresher, surface))
            })
        })
        .build();

    // Prefix commands (`!afkpanel`) need message content.
    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| warn!("Client stopped with error: {:?}", e))?;
    Ok(())
}
