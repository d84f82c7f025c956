//! Shared test utilities.
//!
//! Fixed timestamps, in-memory trackers, and a display surface that records
//! what the refresher asked it to do.

use crate::core::{
    panel::PanelContent,
    registry::Registry,
    surface::{DisplaySurface, SurfaceError},
    tracker::AfkTracker,
};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::{
    Mutex,
    atomic::{AtomicU64, Ordering},
};
use tracing_subscriber::EnvFilter;

/// Duration limit used by tests.
pub const MAX_MINUTES: i64 = 1440;

/// Routes tracing output to the test harness. Safe to call more than once.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")))
        .with_test_writer()
        .try_init();
}

/// A fixed reference instant: 2026-01-05 12:00:00 UTC.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A tracker with no state file.
#[must_use]
pub fn memory_tracker() -> AfkTracker {
    AfkTracker::new(Registry::new(), None, MAX_MINUTES)
}

/// A call the refresher made on the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    /// `edit_panel`
    Edit {
        /// Channel
        channel_id: u64,
        /// Message
        message_id: u64,
    },
    /// `post_panel`
    Post {
        /// Channel
        channel_id: u64,
    },
}

/// How the fake surface answers edits.
#[derive(Debug, Clone, Copy, Default)]
pub enum EditBehavior {
    /// Edits succeed
    #[default]
    Ok,
    /// The message is gone
    Gone,
    /// Transient failure
    Unavailable,
}

/// In-memory display surface that records calls.
#[derive(Debug)]
pub struct RecordingSurface {
    calls: Mutex<Vec<SurfaceCall>>,
    last_content: Mutex<Option<PanelContent>>,
    edit_behavior: Mutex<EditBehavior>,
    post_fails: Mutex<bool>,
    next_message_id: AtomicU64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            last_content: Mutex::new(None),
            edit_behavior: Mutex::new(EditBehavior::Ok),
            post_fails: Mutex::new(false),
            next_message_id: AtomicU64::new(1000),
        }
    }
}

#[allow(clippy::unwrap_used)]
impl RecordingSurface {
    /// Calls made so far, oldest first.
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Content from the most recent successful edit or post.
    pub fn last_content(&self) -> Option<PanelContent> {
        self.last_content.lock().unwrap().clone()
    }

    /// Changes how later edits are answered.
    pub fn set_edit_behavior(&self, behavior: EditBehavior) {
        *self.edit_behavior.lock().unwrap() = behavior;
    }

    /// Makes later posts fail (or succeed again).
    pub fn set_post_fails(&self, fails: bool) {
        *self.post_fails.lock().unwrap() = fails;
    }
}

#[allow(clippy::unwrap_used)]
#[async_trait]
impl DisplaySurface for RecordingSurface {
    async fn edit_panel(
        &self,
        channel_id: u64,
        message_id: u64,
        content: &PanelContent,
    ) -> Result<(), SurfaceError> {
        self.calls.lock().unwrap().push(SurfaceCall::Edit {
            channel_id,
            message_id,
        });
        let behavior = *self.edit_behavior.lock().unwrap();
        match behavior {
            EditBehavior::Ok => {
                *self.last_content.lock().unwrap() = Some(content.clone());
                Ok(())
            }
            EditBehavior::Gone => Err(SurfaceError::Gone("Unknown Message".to_string())),
            EditBehavior::Unavailable => Err(SurfaceError::Unavailable("timeout".to_string())),
        }
    }

    async fn post_panel(
        &self,
        channel_id: u64,
        content: &PanelContent,
    ) -> Result<u64, SurfaceError> {
        self.calls.lock().unwrap().push(SurfaceCall::Post { channel_id });
        if *self.post_fails.lock().unwrap() {
            return Err(SurfaceError::Unavailable("timeout".to_string()));
        }
        *self.last_content.lock().unwrap() = Some(content.clone());
        Ok(self.next_message_id.fetch_add(1, Ordering::Relaxed))
    }
}
