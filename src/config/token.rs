//! Bot token loading.
//!
//! The token only comes from the environment (optionally via `.env`) and is
//! never stored in [`super::settings::AppConfig`].

use crate::errors::{Error, Result};

/// Environment variable holding the Discord bot token.
pub const TOKEN_VAR: &str = "DISCORD_BOT_TOKEN";

/// Reads the bot token from the environment.
///
/// # Errors
/// Returns `Error::Config` when the variable is unset or blank, so startup can
/// stop before any connection is attempted.
pub fn load_token() -> Result<String> {
    token_from(std::env::var(TOKEN_VAR).ok())
}

fn token_from(value: Option<String>) -> Result<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(Error::Config {
            message: format!("{TOKEN_VAR} is not set; add it to the environment or .env"),
        }),
    }
}
