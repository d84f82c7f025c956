//! AFK tracker - the shared, persisted registry.
//!
//! Wraps [`Registry`] with its validation limits and state file, and is the
//! only way the bot layer and the refresh loop touch AFK state. Every read path
//! evicts expired entries first.

use crate::{
    core::{
        duration::parse_duration_minutes,
        registry::{AfkRecord, Registry},
        store,
    },
    errors::Result,
};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Shared AFK state.
#[derive(Debug)]
pub struct AfkTracker {
    registry: Mutex<Registry>,
    state_path: Option<PathBuf>,
    max_duration_minutes: i64,
}

impl AfkTracker {
    /// Creates a tracker around an existing registry.
    ///
    /// With `state_path` set, every mutation rewrites the state file.
    #[must_use]
    pub fn new(registry: Registry, state_path: Option<PathBuf>, max_duration_minutes: i64) -> Self {
        Self {
            registry: Mutex::new(registry),
            state_path,
            max_duration_minutes,
        }
    }

    /// Creates a tracker from the state file at `state_path`.
    pub async fn load(state_path: PathBuf, max_duration_minutes: i64) -> Self {
        let registry = store::load_registry(&state_path).await;
        info!("Restored {} AFK entries from {:?}", registry.len(), state_path);
        Self::new(registry, Some(state_path), max_duration_minutes)
    }

    /// Parses `duration_input` and marks the user AFK.
    #[instrument(skip(self, display_tag, reason))]
    pub async fn enter(
        &self,
        user_id: u64,
        display_tag: &str,
        reason: &str,
        duration_input: &str,
        now: DateTime<Utc>,
    ) -> Result<AfkRecord> {
        let minutes = parse_duration_minutes(duration_input)?;
        self.set_afk(user_id, display_tag, reason, minutes, now).await
    }

    /// Marks the user AFK for `duration_minutes`, replacing any prior entry.
    pub async fn set_afk(
        &self,
        user_id: u64,
        display_tag: &str,
        reason: &str,
        duration_minutes: i64,
        now: DateTime<Utc>,
    ) -> Result<AfkRecord> {
        let mut registry = self.registry.lock().await;
        let record = registry.set_afk(
            user_id,
            display_tag,
            reason,
            duration_minutes,
            self.max_duration_minutes,
            now,
        )?;
        info!(
            "User {} is AFK for {} minutes until {}",
            user_id, duration_minutes, record.expires_at
        );
        self.persist(&registry).await;
        Ok(record)
    }

    /// Clears the user's AFK entry. Returns whether one existed.
    #[instrument(skip(self))]
    pub async fn clear_afk(&self, user_id: u64) -> bool {
        let mut registry = self.registry.lock().await;
        let existed = registry.clear_afk(user_id);
        if existed {
            info!("User {} is back", user_id);
            self.persist(&registry).await;
        }
        existed
    }

    /// Evicts expired entries and returns the removed user ids.
    pub async fn evict_expired(&self, now: DateTime<Utc>) -> Vec<u64> {
        let mut registry = self.registry.lock().await;
        self.evict_locked(&mut registry, now).await
    }

    /// Evicts expired entries, then returns the rest in display order.
    pub async fn snapshot(&self, now: DateTime<Utc>) -> Vec<AfkRecord> {
        let mut registry = self.registry.lock().await;
        self.evict_locked(&mut registry, now).await;
        registry.snapshot()
    }

    async fn evict_locked(&self, registry: &mut Registry, now: DateTime<Utc>) -> Vec<u64> {
        let evicted = registry.evict_expired(now);
        if !evicted.is_empty() {
            debug!("Evicted expired AFK entries: {:?}", evicted);
            self.persist(registry).await;
        }
        evicted
    }

    async fn persist(&self, registry: &Registry) {
        let Some(path) = &self.state_path else {
            return;
        };
        if let Err(e) = store::save_registry(path, registry).await {
            warn!("Failed to save AFK state to {:?}: {}", path, e);
        }
    }
}
