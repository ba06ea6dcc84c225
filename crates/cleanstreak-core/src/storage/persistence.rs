//! Maps tracker state onto key-value storage.
//!
//! Key layout:
//!
//! | Key                      | Value                               |
//! |--------------------------|-------------------------------------|
//! | `addiction`              | JSON category, absent when unset    |
//! | `startDate`              | JSON ISO-8601 timestamp, or absent  |
//! | `goalDays`               | JSON positive integer               |
//! | `addiction_<YYYY-MM-DD>` | JSON boolean outcome for the day    |
//! | `checked_<YYYY-MM-DD>`   | presence marker for the day         |
//!
//! Values that fail to decode are logged and treated as absent.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;

use super::{KeyValueStore, KvOp};
use crate::error::{CoreError, StorageError};
use crate::tracker::{Category, Change, CheckIn, GoalDays, TrackerState};

pub const CATEGORY_KEY: &str = "addiction";
pub const START_DATE_KEY: &str = "startDate";
pub const GOAL_DAYS_KEY: &str = "goalDays";

const CHECKED_MARKER: &str = "true";

pub fn outcome_key(date: NaiveDate) -> String {
    format!("addiction_{}", date.format("%Y-%m-%d"))
}

pub fn checked_key(date: NaiveDate) -> String {
    format!("checked_{}", date.format("%Y-%m-%d"))
}

fn decode<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "ignoring malformed stored value");
            Ok(None)
        }
    }
}

/// Read the scalar tracker state, falling back to `default_goal` when no goal is stored.
pub fn load_state(
    store: &impl KeyValueStore,
    default_goal: GoalDays,
) -> Result<TrackerState, StorageError> {
    Ok(TrackerState {
        category: decode::<Category>(store, CATEGORY_KEY)?,
        streak_start: decode::<DateTime<Utc>>(store, START_DATE_KEY)?,
        goal_days: decode::<GoalDays>(store, GOAL_DAYS_KEY)?.unwrap_or(default_goal),
    })
}

/// Read the record for `date`.
///
/// The `checked_` marker decides whether the day is recorded. A marker without a
/// readable outcome counts as a clean day.
pub fn load_check_in(
    store: &impl KeyValueStore,
    date: NaiveDate,
) -> Result<Option<CheckIn>, StorageError> {
    if store.get(&checked_key(date))?.is_none() {
        return Ok(None);
    }
    let occurred = decode::<bool>(store, &outcome_key(date))?.unwrap_or(false);
    Ok(Some(CheckIn { occurred }))
}

/// Translate transition changes into store writes.
pub fn to_ops(changes: &[Change]) -> Result<Vec<KvOp>, CoreError> {
    let mut ops = Vec::with_capacity(changes.len() + 1);
    for change in changes {
        match *change {
            Change::CategorySet(category) => ops.push(KvOp::Set {
                key: CATEGORY_KEY.to_string(),
                value: serde_json::to_string(&category)?,
            }),
            Change::CategoryCleared => ops.push(KvOp::Remove {
                key: CATEGORY_KEY.to_string(),
            }),
            Change::StreakStarted(at) => ops.push(KvOp::Set {
                key: START_DATE_KEY.to_string(),
                value: serde_json::to_string(&at)?,
            }),
            Change::StreakCleared => ops.push(KvOp::Remove {
                key: START_DATE_KEY.to_string(),
            }),
            Change::GoalSet(goal) => ops.push(KvOp::Set {
                key: GOAL_DAYS_KEY.to_string(),
                value: serde_json::to_string(&goal)?,
            }),
            Change::CheckInRecorded { date, occurred } => {
                // Outcome first, then the guard that seals the day.
                ops.push(KvOp::Set {
                    key: outcome_key(date),
                    value: serde_json::to_string(&occurred)?,
                });
                ops.push(KvOp::Set {
                    key: checked_key(date),
                    value: CHECKED_MARKER.to_string(),
                });
            }
        }
    }
    Ok(ops)
}

/// Persist `changes`. Nothing is written for an empty list.
pub fn apply(store: &mut impl KeyValueStore, changes: &[Change]) -> Result<(), CoreError> {
    if changes.is_empty() {
        return Ok(());
    }
    let ops = to_ops(changes)?;
    store.apply(&ops)?;
    Ok(())
}
