//! Pure streak transitions.
//!
//! Each operation takes the current [`TrackerState`] plus the instant it runs at
//! and returns a [`Transition`]: the next state and the [`Change`]s a
//! persistence adapter must write. Nothing in this module touches storage.
//!
//! ## Transitions
//!
//! ```text
//! select_category: start streak if none, set category if different
//! reset_streak:    streak_start := now
//! check_in(true):  record day, streak_start := now
//! check_in(false): record day, start streak if none
//! forget:          clear category and streak_start
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, GoalDays};

/// Scalar tracker state. Per-day records live in storage, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerState {
    pub category: Option<Category>,
    pub streak_start: Option<DateTime<Utc>>,
    pub goal_days: GoalDays,
}

/// Outcome recorded for one local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    /// The tracked behavior happened on this day.
    pub occurred: bool,
}

/// Check-in status for one day, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStatus {
    pub date: NaiveDate,
    pub has_addiction_today: bool,
    pub checked_today: bool,
}

impl DayStatus {
    pub fn from_record(date: NaiveDate, record: Option<CheckIn>) -> Self {
        Self {
            date,
            has_addiction_today: record.is_some_and(|r| r.occurred),
            checked_today: record.is_some(),
        }
    }
}

/// One row of check-in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub checked: bool,
    pub occurred: bool,
}

impl DayRecord {
    pub fn from_record(date: NaiveDate, record: Option<CheckIn>) -> Self {
        Self {
            date,
            checked: record.is_some(),
            occurred: record.is_some_and(|r| r.occurred),
        }
    }
}

/// A single persisted effect of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    CategorySet(Category),
    CategoryCleared,
    StreakStarted(DateTime<Utc>),
    StreakCleared,
    GoalSet(GoalDays),
    CheckInRecorded { date: NaiveDate, occurred: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: TrackerState,
    pub changes: Vec<Change>,
}

impl Transition {
    fn unchanged(state: &TrackerState) -> Self {
        Self {
            state: state.clone(),
            changes: Vec::new(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

impl TrackerState {
    pub fn has_streak(&self) -> bool {
        self.streak_start.is_some()
    }

    /// Pick a category. Starts a streak only when none is running.
    pub fn select_category(&self, category: Category, now: DateTime<Utc>) -> Transition {
        let mut next = self.clone();
        let mut changes = Vec::new();

        if self.category != Some(category) {
            next.category = Some(category);
            changes.push(Change::CategorySet(category));
        }
        if self.streak_start.is_none() {
            next.streak_start = Some(now);
            changes.push(Change::StreakStarted(now));
        }

        Transition {
            state: next,
            changes,
        }
    }

    /// Start a fresh streak at `now`, keeping category and goal.
    pub fn reset_streak(&self, now: DateTime<Utc>) -> Transition {
        let mut next = self.clone();
        next.streak_start = Some(now);
        Transition {
            state: next,
            changes: vec![Change::StreakStarted(now)],
        }
    }

    pub fn set_goal_days(&self, goal: GoalDays) -> Transition {
        if self.goal_days == goal {
            return Transition::unchanged(self);
        }
        let mut next = self.clone();
        next.goal_days = goal;
        Transition {
            state: next,
            changes: vec![Change::GoalSet(goal)],
        }
    }

    /// Record the outcome for `date`.
    ///
    /// `existing` is what storage already holds for that date; any existing record
    /// makes this a no-op, so the first check-in of a day wins.
    pub fn check_in(
        &self,
        existing: Option<CheckIn>,
        date: NaiveDate,
        occurred: bool,
        now: DateTime<Utc>,
    ) -> Transition {
        if existing.is_some() {
            return Transition::unchanged(self);
        }

        let mut next = self.clone();
        let mut changes = vec![Change::CheckInRecorded { date, occurred }];

        if occurred || self.streak_start.is_none() {
            next.streak_start = Some(now);
            changes.push(Change::StreakStarted(now));
        }

        Transition {
            state: next,
            changes,
        }
    }

    /// Forget category and streak. Goal and per-day history stay.
    pub fn forget(&self) -> Transition {
        let mut changes = Vec::new();
        if self.category.is_some() {
            changes.push(Change::CategoryCleared);
        }
        if self.streak_start.is_some() {
            changes.push(Change::StreakCleared);
        }
        Transition {
            state: TrackerState {
                category: None,
                streak_start: None,
                goal_days: self.goal_days,
            },
            changes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn first_selection_starts_streak() {
        let tr = TrackerState::default().select_category(Category::Smoking, t0());
        assert_eq!(tr.state.category, Some(Category::Smoking));
        assert_eq!(tr.state.streak_start, Some(t0()));
        assert_eq!(
            tr.changes,
            vec![Change::CategorySet(Category::Smoking), Change::StreakStarted(t0())]
        );
    }

    #[test]
    fn reselection_keeps_streak_start() {
        let started = TrackerState::default()
            .select_category(Category::Smoking, t0())
            .state;
        let later = t0() + Duration::days(4);

        let same = started.select_category(Category::Smoking, later);
        assert!(same.is_noop());

        let switched = started.select_category(Category::Both, later);
        assert_eq!(switched.state.streak_start, Some(t0()));
        assert_eq!(switched.changes, vec![Change::CategorySet(Category::Both)]);
    }

    #[test]
    fn relapse_restarts_streak_and_keeps_category() {
        let state = TrackerState::default()
            .select_category(Category::Drinking, t0())
            .state;
        let later = t0() + Duration::days(6);
        let tr = state.check_in(None, day(7), true, later);
        assert_eq!(tr.state.streak_start, Some(later));
        assert_eq!(tr.state.category, Some(Category::Drinking));
        assert_eq!(
            tr.changes,
            vec![
                Change::CheckInRecorded {
                    date: day(7),
                    occurred: true
                },
                Change::StreakStarted(later),
            ]
        );
    }

    #[test]
    fn clean_day_starts_streak_only_when_missing() {
        let fresh = TrackerState::default().check_in(None, day(1), false, t0());
        assert_eq!(fresh.state.streak_start, Some(t0()));

        let later = t0() + Duration::days(1);
        let running = fresh.state.check_in(None, day(2), false, later);
        assert_eq!(running.state.streak_start, Some(t0()));
        assert_eq!(running.changes.len(), 1);
    }

    #[test]
    fn second_check_in_same_day_is_noop() {
        let tr = TrackerState::default().check_in(
            Some(CheckIn { occurred: true }),
            day(1),
            false,
            t0(),
        );
        assert!(tr.is_noop());
        assert_eq!(tr.state, TrackerState::default());
    }

    #[test]
    fn goal_change_only_when_different() {
        let state = TrackerState::default();
        assert!(state.set_goal_days(GoalDays::DEFAULT).is_noop());
        let goal = GoalDays::new(90).unwrap();
        let tr = state.set_goal_days(goal);
        assert_eq!(tr.state.goal_days, goal);
        assert_eq!(tr.changes, vec![Change::GoalSet(goal)]);
    }

    #[test]
    fn forget_clears_category_and_start_but_not_goal() {
        let goal = GoalDays::new(60).unwrap();
        let state = TrackerState {
            category: Some(Category::Both),
            streak_start: Some(t0()),
            goal_days: goal,
        };
        let tr = state.forget();
        assert_eq!(tr.state.category, None);
        assert_eq!(tr.state.streak_start, None);
        assert_eq!(tr.state.goal_days, goal);
        assert_eq!(tr.changes, vec![Change::CategoryCleared, Change::StreakCleared]);
        assert!(tr.state.forget().is_noop());
    }

    #[test]
    fn day_status_from_record() {
        let none = DayStatus::from_record(day(3), None);
        assert!(!none.checked_today && !none.has_addiction_today);
        let relapse = DayStatus::from_record(day(3), Some(CheckIn { occurred: true }));
        assert!(relapse.checked_today && relapse.has_addiction_today);
    }
}
