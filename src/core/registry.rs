//! AFK registry - the set of currently-away users.
//!
//! Records are kept in entry order so the panel lists users first-come,
//! first-served. The registry is a plain value; sharing and persistence are
//! handled by [`crate::core::tracker::AfkTracker`].

use crate::errors::{Error, Result};
use chrono::{DateTime, TimeDelta, Utc};

/// Longest accepted AFK reason, in characters.
pub const MAX_REASON_CHARS: usize = 100;

/// One currently-away user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AfkRecord {
    /// Discord user id
    pub user_id: u64,
    /// Cached label shown on the panel (usually a mention)
    pub display_tag: String,
    /// Why the user is away
    pub reason: String,
    /// When the user went AFK
    pub created_at: DateTime<Utc>,
    /// When the AFK entry lapses
    pub expires_at: DateTime<Utc>,
    /// Requested duration in minutes
    pub duration_minutes: i64,
}

impl AfkRecord {
    /// Whether the entry has lapsed at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Ordered mapping of user id to AFK record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    records: Vec<AfkRecord>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Rebuilds a registry from stored records, ordered by entry time.
    ///
    /// Later duplicates of a user id replace earlier ones, and records that
    /// violate `expires_at > created_at` are dropped.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = AfkRecord>) -> Self {
        let mut records: Vec<AfkRecord> = records
            .into_iter()
            .filter(|r| r.expires_at > r.created_at)
            .collect();
        records.sort_by_key(|r| r.created_at);

        let mut registry = Self::new();
        for record in records {
            registry.insert(record);
        }
        registry
    }

    /// Marks a user as AFK for `duration_minutes` starting at `now`.
    ///
    /// Re-entering replaces the previous record and moves the user to the end
    /// of the display order.
    pub fn set_afk(
        &mut self,
        user_id: u64,
        display_tag: &str,
        reason: &str,
        duration_minutes: i64,
        max_duration_minutes: i64,
        now: DateTime<Utc>,
    ) -> Result<AfkRecord> {
        let reason = validate_reason(reason)?;

        if duration_minutes <= 0 || duration_minutes > max_duration_minutes {
            return Err(Error::DurationOutOfRange {
                minutes: duration_minutes,
                max: max_duration_minutes,
            });
        }

        let expires_at = TimeDelta::try_minutes(duration_minutes)
            .and_then(|delta| now.checked_add_signed(delta))
            .ok_or(Error::DurationOutOfRange {
                minutes: duration_minutes,
                max: max_duration_minutes,
            })?;

        let record = AfkRecord {
            user_id,
            display_tag: display_tag.to_string(),
            reason,
            created_at: now,
            expires_at,
            duration_minutes,
        };
        self.insert(record.clone());
        Ok(record)
    }

    /// Removes a user's record. Returns whether one existed.
    pub fn clear_afk(&mut self, user_id: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.user_id != user_id);
        self.records.len() != before
    }

    /// Removes every record expired at `now` and returns their user ids.
    pub fn evict_expired(&mut self, now: DateTime<Utc>) -> Vec<u64> {
        let mut evicted = Vec::new();
        self.records.retain(|r| {
            if r.is_expired(now) {
                evicted.push(r.user_id);
                false
            } else {
                true
            }
        });
        evicted
    }

    /// Records in display order. Run [`Self::evict_expired`] first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<AfkRecord> {
        self.records.clone()
    }

    /// Looks up a single user's record.
    #[must_use]
    pub fn get(&self, user_id: u64) -> Option<&AfkRecord> {
        self.records.iter().find(|r| r.user_id == user_id)
    }

    /// Number of records held, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn insert(&mut self, record: AfkRecord) {
        self.clear_afk(record.user_id);
        self.records.push(record);
    }
}

fn validate_reason(reason: &str) -> Result<String> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(Error::InvalidReason {
            message: "reason cannot be empty".to_string(),
        });
    }
    if reason.chars().count() > MAX_REASON_CHARS {
        return Err(Error::InvalidReason {
            message: format!("reason must be at most {MAX_REASON_CHARS} characters"),
        });
    }
    Ok(reason.to_string())
}
