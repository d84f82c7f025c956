//! Unified error types for the AFK panel bot.
//!
//! Validation errors are shown privately to the requester and never change state.
//! Persistence errors are recovered by the caller. Configuration errors are fatal
//! at startup.

use thiserror::Error;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration is missing or invalid (fatal at startup)
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Duration input could not be parsed into minutes
    #[error("Invalid duration '{input}': enter minutes (e.g. 15) or H:MM (e.g. 1:30)")]
    InvalidDuration {
        /// The raw input the user typed
        input: String,
    },

    /// Duration parsed but falls outside the accepted range
    #[error("Duration must be between 1 and {max} minutes, got {minutes}")]
    DurationOutOfRange {
        /// Parsed duration in minutes
        minutes: i64,
        /// Configured upper bound
        max: i64,
    },

    /// Reason is empty or too long
    #[error("Invalid reason: {message}")]
    InvalidReason {
        /// Human-readable description of the problem
        message: String,
    },

    /// State file could not be read, parsed or written
    #[error("Persistence error: {message}")]
    Persistence {
        /// Human-readable description of the problem
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl Error {
    /// Returns true for errors caused by bad user input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDuration { .. } | Self::DurationOutOfRange { .. } | Self::InvalidReason { .. }
        )
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(Error::InvalidDuration { input: "abc".to_string() }.is_validation());
        assert!(Error::DurationOutOfRange { minutes: 0, max: 10 }.is_validation());
        assert!(Error::InvalidReason { message: "empty".to_string() }.is_validation());
        assert!(!Error::Config { message: "x".to_string() }.is_validation());
        assert!(!Error::Persistence { message: "x".to_string() }.is_validation());
    }

    #[test]
    fn test_invalid_duration_message_mentions_input() {
        let err = Error::InvalidDuration { input: "abc".to_string() };
        assert!(err.to_string().contains("'abc'"));
    }
}
