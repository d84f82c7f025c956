//! Remaining-time computation and display formatting.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

/// How remaining time is shown on the panel. Fixed per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeStyle {
    /// `"12m 5s"`, or `"5s"` under a minute
    #[default]
    MinutesSeconds,
    /// `"13m"`, whole minutes rounded up
    Minutes,
}

/// Time left until `expires_at`. Zero means the entry is expired.
#[must_use]
pub fn remaining(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (expires_at - now).to_std().unwrap_or(Duration::ZERO)
}

/// Renders a remaining duration for display.
#[must_use]
pub fn format_remaining(remaining: Duration, style: TimeStyle) -> String {
    let total_secs = remaining.as_secs();
    match style {
        TimeStyle::MinutesSeconds => {
            let minutes = total_secs / 60;
            let seconds = total_secs % 60;
            if minutes > 0 {
                format!("{minutes}m {seconds}s")
            } else {
                format!("{seconds}s")
            }
        }
        TimeStyle::Minutes => format!("{}m", total_secs.div_ceil(60)),
    }
}
