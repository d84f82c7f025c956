//! Panel rendering - turns a registry snapshot into display content.
//!
//! Rendering is pure: the same records, `now` and style always give the same
//! output. Eviction is the caller's job; records already expired at `now` are
//! skipped here only so a stale snapshot can never show a negative timer.

use crate::core::{
    registry::AfkRecord,
    time_format::{TimeStyle, format_remaining, remaining},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Presentation settings for the panel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PanelStyle {
    /// Embed title
    pub title: String,
    /// Accent colour as `0xRRGGBB`
    pub colour: u32,
    /// Optional thumbnail image URL
    pub thumbnail_url: Option<String>,
    /// Body shown when nobody is away
    pub empty_message: String,
    /// How remaining time is written
    pub time_style: TimeStyle,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            title: "⏳ Currently AFK".to_string(),
            colour: 0xE6_7E_22,
            thumbnail_url: None,
            empty_message: "Nobody is AFK right now.".to_string(),
            time_style: TimeStyle::default(),
        }
    }
}

/// Rendered panel, ready to be turned into an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelContent {
    /// Embed title
    pub title: String,
    /// Embed body
    pub description: String,
    /// Accent colour
    pub colour: u32,
    /// Optional thumbnail image URL
    pub thumbnail_url: Option<String>,
}

/// Renders the panel for `records` as of `now`.
#[must_use]
pub fn render(records: &[AfkRecord], now: DateTime<Utc>, style: &PanelStyle) -> PanelContent {
    let mut description = String::new();

    for (index, record) in active(records, now).enumerate() {
        let left = format_remaining(remaining(record.expires_at, now), style.time_style);
        description.push_str(&format!(
            "**{}. {}**\nReason: `{}`\n⏳ Time left: `{}`\n\n",
            index + 1,
            record.display_tag,
            sanitize(&record.reason),
            left
        ));
    }

    if description.is_empty() {
        description.clone_from(&style.empty_message);
    } else {
        description.truncate(description.trim_end().len());
    }

    PanelContent {
        title: style.title.clone(),
        description,
        colour: style.colour,
        thumbnail_url: style.thumbnail_url.clone(),
    }
}

/// Renders the private stats listing: a count followed by one line per user.
#[must_use]
pub fn render_stats(records: &[AfkRecord], now: DateTime<Utc>, style: &PanelStyle) -> String {
    let lines: Vec<String> = active(records, now)
        .enumerate()
        .map(|(index, record)| {
            format!(
                "{}. {} — {} — {} left",
                index + 1,
                record.display_tag,
                sanitize(&record.reason),
                format_remaining(remaining(record.expires_at, now), style.time_style)
            )
        })
        .collect();

    if lines.is_empty() {
        return format!("📊 Active AFK entries: 0\n{}", style.empty_message);
    }

    format!("📊 Active AFK entries: {}\n{}", lines.len(), lines.join("\n"))
}

fn active(records: &[AfkRecord], now: DateTime<Utc>) -> impl Iterator<Item = &AfkRecord> {
    records.iter().filter(move |r| !r.is_expired(now))
}

// Backticks would close the inline code span around the reason.
fn sanitize(reason: &str) -> String {
    reason.replace('`', "'")
}
