use afk_panel::{
    bot,
    config::{settings, token},
    core::{refresh::PanelRefresher, tracker::AfkTracker},
    errors::Result,
};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Load settings and the token before touching the network
    let app_config = settings::load_default_config()
        .inspect_err(|e| error!("Critical error loading configuration: {}", e))?;
    let token = token::load_token().inspect_err(|e| error!("{}", e))?;
    info!(
        "Configuration loaded, refreshing every {}s",
        app_config.refresh_interval_secs
    );

    // 4. Restore persisted state
    let tracker = Arc::new(
        AfkTracker::load(app_config.state_path.clone(), app_config.max_duration_minutes).await,
    );
    let refresher = Arc::new(
        PanelRefresher::load(app_config.panel_path.clone(), app_config.panel.clone()).await,
    );

    // 5. Run the bot
    bot::run_bot(&token, Arc::new(app_config), tracker, refresher).await
}
