//! JSON state files for the registry and the panel location.
//!
//! Loading never fails: a missing file means empty state, and an unreadable
//! or corrupt file is logged and treated the same way. Files are written to a
//! sibling temp file and renamed into place.

use crate::{
    core::{
        registry::{AfkRecord, Registry},
        surface::PanelLocation,
    },
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{collections::BTreeMap, ffi::OsStr, path::Path};
use tracing::{debug, warn};

/// One user's entry as written to the state file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    /// Cached display label
    pub username: String,
    /// Why the user is away
    pub reason: String,
    /// When the entry was created
    pub start_time: DateTime<Utc>,
    /// When the entry lapses
    pub end_time: DateTime<Utc>,
    /// Requested duration in minutes
    pub duration_minutes: i64,
}

/// State file layout: user id (as a string) to entry.
pub type StoredState = BTreeMap<String, StoredEntry>;

/// Converts a registry into its on-disk form.
#[must_use]
pub fn to_stored(registry: &Registry) -> StoredState {
    registry
        .snapshot()
        .into_iter()
        .map(|r| {
            (
                r.user_id.to_string(),
                StoredEntry {
                    username: r.display_tag,
                    reason: r.reason,
                    start_time: r.created_at,
                    end_time: r.expires_at,
                    duration_minutes: r.duration_minutes,
                },
            )
        })
        .collect()
}

/// Rebuilds a registry from its on-disk form, skipping entries with a bad key.
#[must_use]
pub fn from_stored(state: StoredState) -> Registry {
    let records = state.into_iter().filter_map(|(key, entry)| {
        let Ok(user_id) = key.parse::<u64>() else {
            warn!("Skipping stored AFK entry with invalid user id '{}'", key);
            return None;
        };
        Some(AfkRecord {
            user_id,
            display_tag: entry.username,
            reason: entry.reason,
            created_at: entry.start_time,
            expires_at: entry.end_time,
            duration_minutes: entry.duration_minutes,
        })
    });
    Registry::from_records(records)
}

/// Loads the registry, falling back to empty state on any problem.
pub async fn load_registry(path: &Path) -> Registry {
    match read_json::<StoredState>(path).await {
        Ok(Some(state)) => {
            let registry = from_stored(state);
            debug!("Loaded {} AFK entries from {:?}", registry.len(), path);
            registry
        }
        Ok(None) => Registry::new(),
        Err(e) => {
            warn!("Ignoring unreadable AFK state {:?}: {}", path, e);
            Registry::new()
        }
    }
}

/// Writes the registry to `path`.
pub async fn save_registry(path: &Path, registry: &Registry) -> Result<()> {
    write_json(path, &to_stored(registry)).await
}

/// Loads the panel location, if one was saved and is readable.
pub async fn load_panel(path: &Path) -> Option<PanelLocation> {
    match read_json::<PanelLocation>(path).await {
        Ok(location) => location,
        Err(e) => {
            warn!("Ignoring unreadable panel state {:?}: {}", path, e);
            None
        }
    }
}

/// Writes the panel location to `path`.
pub async fn save_panel(path: &Path, location: &PanelLocation) -> Result<()> {
    write_json(path, location).await
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if contents.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&contents).map(Some).map_err(Into::into)
}

async fn write_json<T: Serialize + Sync>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(value)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");

    if let Err(e) = tokio::fs::write(&tmp, json).await {
        discard_tmp(&tmp).await;
        return Err(e.into());
    }
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        discard_tmp(&tmp).await;
        return Err(Error::Persistence {
            message: format!("Failed to move state into place at {}: {e}", path.display()),
        });
    }
    Ok(())
}

async fn discard_tmp(tmp: &OsStr) {
    match tokio::fs::remove_file(tmp).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => debug!("Could not remove temp file {:?}: {}", tmp, e),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{MAX_MINUTES, fixed_now, init_test_tracing};
    use chrono::TimeDelta;

    #[tokio::test]
    async fn test_registry_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("afk.json");
        let now = fixed_now();

        let mut registry = Registry::new();
        registry.set_afk(11, "<@11>", "lunch", 30, MAX_MINUTES, now).unwrap();
        registry
            .set_afk(22, "<@22>", "meeting", 90, MAX_MINUTES, now + TimeDelta::seconds(5))
            .unwrap();

        save_registry(&path, &registry).await.unwrap();
        let loaded = load_registry(&path).await;

        assert_eq!(loaded, registry);
    }

    #[tokio::test]
    async fn test_file_uses_documented_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("afk.json");
        let now = fixed_now();

        let mut registry = Registry::new();
        registry.set_afk(42, "<@42>", "lunch", 15, MAX_MINUTES, now).unwrap();
        save_registry(&path, &registry).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&tokio::fs::read_to_string(&path).await.unwrap()).unwrap();
        let entry = &raw["42"];
        assert_eq!(entry["username"], "<@42>");
        assert_eq!(entry["reason"], "lunch");
        assert_eq!(entry["duration_minutes"], 15);
        assert_eq!(entry["start_time"], "2026-01-05T12:00:00Z");
        assert_eq!(entry["end_time"], "2026-01-05T12:15:00Z");
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let registry = load_registry(&dir.path().join("absent.json")).await;
        assert!(registry.is_empty());
        assert!(load_panel(&dir.path().join("absent.json")).await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_empty_state() {
        init_test_tracing();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("afk.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        assert!(load_registry(&path).await.is_empty());
        assert!(load_panel(&path).await.is_none());
    }

    #[tokio::test]
    async fn test_bad_user_id_key_is_skipped() {
        init_test_tracing();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("afk.json");
        let json = r#"{
            "abc": {"username": "x", "reason": "r", "start_time": "2026-01-05T12:00:00Z",
                    "end_time": "2026-01-05T12:10:00Z", "duration_minutes": 10},
            "7": {"username": "<@7>", "reason": "tea", "start_time": "2026-01-05T12:00:00Z",
                  "end_time": "2026-01-05T12:10:00Z", "duration_minutes": 10}
        }"#;
        tokio::fs::write(&path, json).await.unwrap();

        let registry = load_registry(&path).await;
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(7).map(|r| r.reason.as_str()), Some("tea"));
    }

    #[tokio::test]
    async fn test_failed_rename_leaves_no_temp_file() {
        init_test_tracing();
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory cannot be replaced by a file.
        let path = dir.path().join("afk.json");
        tokio::fs::create_dir(&path).await.unwrap();
        tokio::fs::write(path.join("keep"), "x").await.unwrap();

        let result = save_registry(&path, &Registry::new()).await;
        assert!(matches!(result, Err(Error::Persistence { .. })));
        assert!(!dir.path().join("afk.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_panel_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.json");
        let location = PanelLocation {
            channel_id: 100,
            message_id: Some(200),
        };

        save_panel(&path, &location).await.unwrap();
        assert_eq!(load_panel(&path).await, Some(location));
    }
}
