//! Streak tracker handle.
//!
//! Owns the store and clock, holds the committed [`TrackerState`] and the cached
//! today-slot, and runs every operation as: read clock, compute the pure
//! transition, persist its changes, then commit in memory. A failed write leaves
//! the in-memory state untouched.
//!
//! ## Usage
//!
//! ```ignore
//! let mut tracker = StreakTracker::load(Database::open()?, SystemClock)?;
//! tracker.select_category(Category::Smoking)?;
//! tracker.check_in_today(false)?;
//! println!("{} days", tracker.days_since());
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::milestones::{milestones, next_milestone, Milestone};
use super::progress::{self, StreakPhase};
use super::state::{CheckIn, DayRecord, DayStatus, TrackerState, Transition};
use super::{Category, GoalDays};
use crate::clock::{Clock, SystemClock};
use crate::error::{Result, ValidationError};
use crate::storage::{persistence, KeyValueStore};

/// Everything a presentation layer shows, computed at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub category: Option<Category>,
    pub title: String,
    pub streak_start: Option<DateTime<Utc>>,
    pub days_since: u32,
    pub percent_complete: u8,
    pub goal_days: GoalDays,
    pub goal_progress_days: u32,
    pub today: DayStatus,
    pub phase: StreakPhase,
    pub message: String,
    pub milestones: Vec<Milestone>,
    pub next_milestone: Option<Milestone>,
    pub at: DateTime<Utc>,
}

pub struct StreakTracker<S, C = SystemClock> {
    store: S,
    clock: C,
    state: TrackerState,
    today: DayStatus,
    default_goal: GoalDays,
}

/// Widest range [`StreakTracker::history`] will read, in days.
pub const MAX_HISTORY_DAYS: u32 = 3660;

impl<S: KeyValueStore, C: Clock> StreakTracker<S, C> {
    /// Load persisted state with the standard 30-day goal default.
    pub fn load(store: S, clock: C) -> Result<Self> {
        Self::load_with_default_goal(store, clock, GoalDays::DEFAULT)
    }

    /// Load persisted state; `default_goal` applies when no goal was ever stored.
    pub fn load_with_default_goal(store: S, clock: C, default_goal: GoalDays) -> Result<Self> {
        let state = persistence::load_state(&store, default_goal)?;
        let date = clock.today();
        let today = DayStatus::from_record(date, persistence::load_check_in(&store, date)?);
        tracing::debug!(?state, ?today, "streak tracker loaded");
        Ok(Self {
            store,
            clock,
            state,
            today,
            default_goal,
        })
    }

    /// Re-read scalar state and today's record from the store. Never writes.
    ///
    /// Long-lived readers call this to pick up changes made through another handle.
    pub fn reload(&mut self) -> Result<()> {
        let state = persistence::load_state(&self.store, self.default_goal)?;
        let date = self.clock.today();
        let record = persistence::load_check_in(&self.store, date)?;
        self.state = state;
        self.today = DayStatus::from_record(date, record);
        tracing::debug!(state = ?self.state, "streak tracker reloaded");
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn category(&self) -> Option<Category> {
        self.state.category
    }

    pub fn streak_start(&self) -> Option<DateTime<Utc>> {
        self.state.streak_start
    }

    pub fn goal_days(&self) -> GoalDays {
        self.state.goal_days
    }

    /// Cached status for the day last resolved as "today".
    ///
    /// Refreshed by [`Self::day_rollover`] and by check-ins for that date.
    pub fn today(&self) -> DayStatus {
        self.today
    }

    pub fn has_addiction_today(&self) -> bool {
        self.today.has_addiction_today
    }

    pub fn checked_today(&self) -> bool {
        self.today.checked_today
    }

    pub fn days_since(&self) -> u32 {
        progress::days_since(self.state.streak_start, self.clock.now_utc())
    }

    pub fn percent_complete(&self) -> u8 {
        progress::percent_complete(
            self.state.streak_start,
            self.clock.now_utc(),
            self.state.goal_days,
        )
    }

    pub fn check_in_for(&self, date: NaiveDate) -> Result<Option<CheckIn>> {
        Ok(persistence::load_check_in(&self.store, date)?)
    }

    /// Record of every day from `from` to `to`, both inclusive.
    ///
    /// Ranges wider than [`MAX_HISTORY_DAYS`] are rejected.
    pub fn history(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DayRecord>> {
        let span = (to - from).num_days() + 1;
        if span > i64::from(MAX_HISTORY_DAYS) {
            return Err(ValidationError::InvalidValue {
                field: "history".to_string(),
                message: format!("range of {span} days exceeds {MAX_HISTORY_DAYS}"),
            }
            .into());
        }
        from.iter_days()
            .take_while(|date| *date <= to)
            .map(|date| -> Result<DayRecord> {
                Ok(DayRecord::from_record(date, self.check_in_for(date)?))
            })
            .collect()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let now = self.clock.now_utc();
        let days = progress::days_since(self.state.streak_start, now);
        let phase = StreakPhase::for_days(days);
        ProgressSnapshot {
            category: self.state.category,
            title: Category::title(self.state.category).to_string(),
            streak_start: self.state.streak_start,
            days_since: days,
            percent_complete: progress::percent_complete(
                self.state.streak_start,
                now,
                self.state.goal_days,
            ),
            goal_days: self.state.goal_days,
            goal_progress_days: progress::goal_progress_days(days, self.state.goal_days),
            today: self.today,
            phase,
            message: phase.message().to_string(),
            milestones: milestones(self.state.category, days),
            next_milestone: next_milestone(self.state.category, days),
            at: now,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn select_category(&mut self, category: Category) -> Result<()> {
        let now = self.clock.now_utc();
        let transition = self.state.select_category(category, now);
        self.commit(transition)?;
        tracing::info!(%category, "category selected");
        Ok(())
    }

    pub fn reset_streak(&mut self) -> Result<()> {
        let now = self.clock.now_utc();
        let transition = self.state.reset_streak(now);
        self.commit(transition)?;
        tracing::info!(at = %now, "streak reset");
        Ok(())
    }

    pub fn set_goal_days(&mut self, days: i64) -> Result<()> {
        let goal = GoalDays::new(days)?;
        let transition = self.state.set_goal_days(goal);
        self.commit(transition)?;
        tracing::debug!(%goal, "goal updated");
        Ok(())
    }

    /// Record whether the behavior occurred on `date`.
    ///
    /// Only the first check-in for a date takes effect; later ones return the
    /// existing status unchanged.
    pub fn check_in(&mut self, date: NaiveDate, occurred: bool) -> Result<DayStatus> {
        let existing = persistence::load_check_in(&self.store, date)?;
        if let Some(record) = existing {
            tracing::debug!(%date, occurred, "already checked in, ignoring");
            return Ok(DayStatus::from_record(date, Some(record)));
        }

        let now = self.clock.now_utc();
        let transition = self.state.check_in(existing, date, occurred, now);
        self.commit(transition)?;

        let status = DayStatus::from_record(date, Some(CheckIn { occurred }));
        if date == self.today.date {
            self.today = status;
        }
        if occurred {
            tracing::info!(%date, "relapse recorded, streak restarted");
        } else {
            tracing::info!(%date, "clean day recorded");
        }
        Ok(status)
    }

    /// [`Self::check_in`] for the clock's current local date.
    pub fn check_in_today(&mut self, occurred: bool) -> Result<DayStatus> {
        let date = self.clock.today();
        self.check_in(date, occurred)
    }

    /// Clear category and streak start. Goal and history are kept.
    pub fn forget(&mut self) -> Result<()> {
        let transition = self.state.forget();
        self.commit(transition)?;
        tracing::info!("category and streak cleared");
        Ok(())
    }

    /// Re-resolve "today" against the clock and reload its record. Never writes.
    ///
    /// Returns `true` when the local date actually changed.
    pub fn day_rollover(&mut self) -> Result<bool> {
        let date = self.clock.today();
        let record = persistence::load_check_in(&self.store, date)?;
        let changed = date != self.today.date;
        self.today = DayStatus::from_record(date, record);
        if changed {
            tracing::info!(%date, checked = self.today.checked_today, "day rolled over");
        }
        Ok(changed)
    }

    fn commit(&mut self, transition: Transition) -> Result<()> {
        if transition.is_noop() {
            return Ok(());
        }
        persistence::apply(&mut self.store, &transition.changes)?;
        tracing::debug!(changes = ?transition.changes, "transition committed");
        self.state = transition.state;
        Ok(())
    }
}
