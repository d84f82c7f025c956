//! Duration input parsing.
//!
//! Users type durations into a free-text field, so parsing is lenient about
//! surrounding text: `"15"`, `"15 min"` and `"~15m"` all mean fifteen minutes.
//! An `H:MM` form (`"1:30"`) is read as hours and minutes.

use crate::errors::{Error, Result};

/// Parses a user-supplied duration into whole minutes.
///
/// Range checks are left to the registry; this only rejects input that holds no
/// usable number.
pub fn parse_duration_minutes(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    let invalid = || Error::InvalidDuration {
        input: input.to_string(),
    };

    if let Some((hours, minutes)) = trimmed.split_once(':') {
        let hours: i64 = hours.trim().parse().map_err(|_| invalid())?;
        let minutes: i64 = minutes.trim().parse().map_err(|_| invalid())?;
        if hours < 0 || !(0..60).contains(&minutes) {
            return Err(invalid());
        }
        return hours
            .checked_mul(60)
            .and_then(|h| h.checked_add(minutes))
            .ok_or_else(invalid);
    }

    let digits: String = trimmed
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();

    if digits.is_empty() {
        return Err(invalid());
    }

    digits.parse().map_err(|_| invalid())
}
