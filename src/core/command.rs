//! Inbound commands and their single dispatch point.
//!
//! Buttons, modals, and slash commands are all normalized to [`Command`] by
//! the bot layer, so the business rules live here and can be tested without
//! Discord.

use crate::{
    core::{
        panel::render_stats,
        refresh::{PanelRefresher, RefreshOutcome},
        registry::AfkRecord,
        surface::DisplaySurface,
        tracker::AfkTracker,
    },
    errors::Result,
};
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

/// A user or admin request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Mark the requester AFK
    EnterAfk {
        /// Requesting user
        user_id: u64,
        /// Label shown on the panel
        display_tag: String,
        /// Free-text reason
        reason: String,
        /// Raw duration input (`"15"` or `"1:30"`)
        duration: String,
    },
    /// Clear the requester's AFK entry
    ExitAfk {
        /// Requesting user
        user_id: u64,
    },
    /// Bind the panel to a channel and post it fresh
    InitPanel {
        /// Channel to post in
        channel_id: u64,
    },
    /// List active entries for the requester
    ShowStats,
}

/// Result of a successfully handled command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The requester is now AFK
    Entered(AfkRecord),
    /// The requester's AFK entry was cleared
    Exited,
    /// The requester was not AFK
    NotAfk,
    /// The panel was bound to a channel
    PanelBound {
        /// Whether the new panel message was posted right away
        posted: bool,
    },
    /// Stats listing text
    Stats(String),
}

impl Reply {
    /// Text sent privately back to the requester.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Entered(record) => format!(
                "✅ You are AFK for {} minutes (until <t:{}:t>).",
                record.duration_minutes,
                record.expires_at.timestamp()
            ),
            Self::Exited => "✅ Welcome back! You are no longer AFK.".to_string(),
            Self::NotAfk => "You are not AFK.".to_string(),
            Self::PanelBound { posted: true } => "✅ AFK panel posted in this channel.".to_string(),
            Self::PanelBound { posted: false } => {
                "⚠️ AFK panel bound to this channel, but posting failed. It will be retried shortly."
                    .to_string()
            }
            Self::Stats(text) => text.clone(),
        }
    }
}

/// Handles one command and refreshes the panel when state changed.
///
/// Validation failures are returned as errors and leave state untouched.
#[instrument(skip(tracker, refresher, surface))]
pub async fn dispatch(
    tracker: &AfkTracker,
    refresher: &PanelRefresher,
    surface: &dyn DisplaySurface,
    command: Command,
    now: DateTime<Utc>,
) -> Result<Reply> {
    let reply = match command {
        Command::EnterAfk {
            user_id,
            display_tag,
            reason,
            duration,
        } => {
            let record = tracker
                .enter(user_id, &display_tag, &reason, &duration, now)
                .await?;
            refresher.refresh(tracker, surface, now).await;
            Reply::Entered(record)
        }
        Command::ExitAfk { user_id } => {
            if tracker.clear_afk(user_id).await {
                refresher.refresh(tracker, surface, now).await;
                Reply::Exited
            } else {
                Reply::NotAfk
            }
        }
        Command::InitPanel { channel_id } => {
            refresher.bind(channel_id).await;
            let outcome = refresher.refresh(tracker, surface, now).await;
            Reply::PanelBound {
                posted: matches!(outcome, RefreshOutcome::Posted { .. }),
            }
        }
        Command::ShowStats => {
            let records = tracker.snapshot(now).await;
            Reply::Stats(render_stats(&records, now, refresher.style()))
        }
    };
    debug!("Command handled: {:?}", reply);
    Ok(reply)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{panel::PanelStyle, surface::PanelLocation};
    use crate::errors::Error;
    use crate::test_utils::{
        RecordingSurface, SurfaceCall, fixed_now, init_test_tracing, memory_tracker,
    };
    use chrono::TimeDelta;

    fn enter(user_id: u64, reason: &str, duration: &str) -> Command {
        Command::EnterAfk {
            user_id,
            display_tag: format!("<@{user_id}>"),
            reason: reason.to_string(),
            duration: duration.to_string(),
        }
    }

    fn bound_refresher() -> PanelRefresher {
        PanelRefresher::new(
            Some(PanelLocation {
                channel_id: 10,
                message_id: Some(1),
            }),
            None,
            PanelStyle::default(),
        )
    }

    #[tokio::test]
    async fn test_enter_refreshes_panel() {
        init_test_tracing();
        let tracker = memory_tracker();
        let refresher = bound_refresher();
        let surface = RecordingSurface::default();

        let reply = dispatch(&tracker, &refresher, &surface, enter(5, "lunch", "15"), fixed_now())
            .await
            .unwrap();

        let Reply::Entered(record) = &reply else {
            unreachable!("expected Entered, got {reply:?}");
        };
        assert_eq!(record.duration_minutes, 15);
        assert!(reply.message().contains("15 minutes"));
        assert_eq!(
            surface.calls(),
            vec![SurfaceCall::Edit {
                channel_id: 10,
                message_id: 1
            }]
        );
        assert!(surface.last_content().unwrap().description.contains("lunch"));
    }

    #[tokio::test]
    async fn test_invalid_input_changes_nothing() {
        let tracker = memory_tracker();
        let refresher = bound_refresher();
        let surface = RecordingSurface::default();

        let result =
            dispatch(&tracker, &refresher, &surface, enter(5, "lunch", "abc"), fixed_now()).await;
        assert!(matches!(result, Err(Error::InvalidDuration { .. })));

        let result =
            dispatch(&tracker, &refresher, &surface, enter(5, "", "10"), fixed_now()).await;
        assert!(matches!(result, Err(Error::InvalidReason { .. })));

        assert!(tracker.snapshot(fixed_now()).await.is_empty());
        assert!(surface.calls().is_empty());
    }

    #[tokio::test]
    async fn test_exit_when_not_afk_is_benign() {
        let tracker = memory_tracker();
        let refresher = bound_refresher();
        let surface = RecordingSurface::default();

        let reply = dispatch(
            &tracker,
            &refresher,
            &surface,
            Command::ExitAfk { user_id: 5 },
            fixed_now(),
        )
        .await
        .unwrap();

        assert_eq!(reply, Reply::NotAfk);
        assert_eq!(reply.message(), "You are not AFK.");
        assert!(surface.calls().is_empty());
    }

    #[tokio::test]
    async fn test_exit_clears_and_refreshes() {
        let tracker = memory_tracker();
        let refresher = bound_refresher();
        let surface = RecordingSurface::default();
        let now = fixed_now();
        dispatch(&tracker, &refresher, &surface, enter(5, "lunch", "15"), now)
            .await
            .unwrap();

        let reply = dispatch(
            &tracker,
            &refresher,
            &surface,
            Command::ExitAfk { user_id: 5 },
            now,
        )
        .await
        .unwrap();

        assert_eq!(reply, Reply::Exited);
        assert_eq!(surface.calls().len(), 2);
        assert_eq!(
            surface.last_content().unwrap().description,
            PanelStyle::default().empty_message
        );
    }

    #[tokio::test]
    async fn test_init_panel_posts_fresh_message() {
        let tracker = memory_tracker();
        let refresher = bound_refresher();
        let surface = RecordingSurface::default();

        let reply = dispatch(
            &tracker,
            &refresher,
            &surface,
            Command::InitPanel { channel_id: 20 },
            fixed_now(),
        )
        .await
        .unwrap();

        assert_eq!(reply, Reply::PanelBound { posted: true });
        assert_eq!(surface.calls(), vec![SurfaceCall::Post { channel_id: 20 }]);
        assert_eq!(refresher.location().await.map(|l| l.channel_id), Some(20));
    }

    #[tokio::test]
    async fn test_init_panel_reports_failed_post() {
        init_test_tracing();
        let tracker = memory_tracker();
        let refresher = bound_refresher();
        let surface = RecordingSurface::default();
        surface.set_post_fails(true);

        let reply = dispatch(
            &tracker,
            &refresher,
            &surface,
            Command::InitPanel { channel_id: 20 },
            fixed_now(),
        )
        .await
        .unwrap();

        assert_eq!(reply, Reply::PanelBound { posted: false });
    }

    #[tokio::test]
    async fn test_stats_evicts_and_lists() {
        let tracker = memory_tracker();
        let refresher = bound_refresher();
        let surface = RecordingSurface::default();
        let now = fixed_now();
        dispatch(&tracker, &refresher, &surface, enter(1, "lunch", "30"), now)
            .await
            .unwrap();
        dispatch(&tracker, &refresher, &surface, enter(2, "call", "1"), now)
            .await
            .unwrap();

        let reply = dispatch(
            &tracker,
            &refresher,
            &surface,
            Command::ShowStats,
            now + TimeDelta::minutes(2),
        )
        .await
        .unwrap();

        let text = reply.message();
        assert!(text.starts_with("📊 Active AFK entries: 1"));
        assert!(text.contains("<@1> — lunch"));
        assert!(!text.contains("<@2>"));
    }
}
