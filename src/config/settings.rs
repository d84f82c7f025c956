//! Application settings loaded from config.toml
//!
//! Every field has a default, so the bot runs without a config file. The file
//! path can be overridden with the `AFK_CONFIG` environment variable.

use crate::{
    core::panel::PanelStyle,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Default config file location.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Accepted refresh cadence, in seconds.
pub const REFRESH_INTERVAL_RANGE: std::ops::RangeInclusive<u64> = 1..=30;

/// Upper bound for `max_duration_minutes`: one year.
pub const MAX_DURATION_LIMIT_MINUTES: i64 = 365 * 24 * 60;

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_VAR: &str = "AFK_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seconds between panel refreshes (1..=30)
    pub refresh_interval_secs: u64,
    /// Where AFK entries are persisted
    pub state_path: PathBuf,
    /// Where the panel location is persisted
    pub panel_path: PathBuf,
    /// Longest accepted AFK duration
    pub max_duration_minutes: i64,
    /// Panel presentation
    pub panel: PanelStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 1,
            state_path: PathBuf::from("data/afk_state.json"),
            panel_path: PathBuf::from("data/afk_panel.json"),
            max_duration_minutes: 24 * 60,
            panel: PanelStyle::default(),
        }
    }
}

impl AppConfig {
    /// Refresh cadence as a `Duration`.
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Rejects values the bot cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !REFRESH_INTERVAL_RANGE.contains(&self.refresh_interval_secs) {
            return Err(Error::Config {
                message: format!(
                    "refresh_interval_secs must be between {} and {}, got {}",
                    REFRESH_INTERVAL_RANGE.start(),
                    REFRESH_INTERVAL_RANGE.end(),
                    self.refresh_interval_secs
                ),
            });
        }
        if !(1..=MAX_DURATION_LIMIT_MINUTES).contains(&self.max_duration_minutes) {
            return Err(Error::Config {
                message: format!(
                    "max_duration_minutes must be between 1 and {MAX_DURATION_LIMIT_MINUTES}, got {}",
                    self.max_duration_minutes
                ),
            });
        }
        if self.panel.colour > 0xFF_FF_FF {
            return Err(Error::Config {
                message: format!("panel.colour {:#X} is not a 24-bit colour", self.panel.colour),
            });
        }
        Ok(())
    }
}

/// Parses and validates settings from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads settings from a TOML file. A missing file yields the defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read, is not valid TOML,
/// or holds out-of-range values.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No config file at {:?}, using defaults", path);
            return Ok(AppConfig::default());
        }
        Err(e) => {
            return Err(Error::Config {
                message: format!("Failed to read config file {}: {e}", path.display()),
            });
        }
    };
    tracing::debug!("Loaded configuration from {:?}", path);
    parse_config(&contents)
}

/// Loads settings from `AFK_CONFIG`, or ./config.toml when unset.
///
/// # Errors
/// Returns an error if `AFK_CONFIG` is not valid unicode, or if loading fails.
pub fn load_default_config() -> Result<AppConfig> {
    load_config(config_path_from(std::env::var(CONFIG_PATH_VAR))?)
}

fn config_path_from(value: std::result::Result<String, std::env::VarError>) -> Result<String> {
    match value {
        Ok(path) => Ok(path),
        Err(std::env::VarError::NotPresent) => Ok(DEFAULT_CONFIG_PATH.to_string()),
        Err(e) => Err(e.into()),
    }
}
