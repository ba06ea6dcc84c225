//! Derived progress values.
//!
//! Everything here is a pure function of the streak start, the goal and the
//! current instant. Nothing is cached; callers recompute on every read.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Target day count for the percentage display. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct GoalDays(u32);

impl GoalDays {
    pub const DEFAULT: GoalDays = GoalDays(30);

    pub fn new(days: i64) -> Result<Self, ValidationError> {
        if days <= 0 {
            return Err(ValidationError::NonPositiveGoal(days));
        }
        u32::try_from(days)
            .map(GoalDays)
            .map_err(|_| ValidationError::InvalidValue {
                field: "goal_days".to_string(),
                message: format!("{days} is too large"),
            })
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for GoalDays {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for GoalDays {
    type Error = ValidationError;

    fn try_from(days: i64) -> Result<Self, Self::Error> {
        GoalDays::new(days)
    }
}

impl From<GoalDays> for u32 {
    fn from(goal: GoalDays) -> Self {
        goal.0
    }
}

impl fmt::Display for GoalDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whole days elapsed since `start`, or 0 without a streak.
///
/// A start in the future (clock moved backwards) counts as day 0.
pub fn days_since(start: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u32 {
    match start {
        Some(start) => {
            let days = (now - start).num_days().max(0);
            u32::try_from(days).unwrap_or(u32::MAX)
        }
        None => 0,
    }
}

/// `round(100 * days / goal)` clamped to 100, or 0 without a streak.
pub fn percent_complete(start: Option<DateTime<Utc>>, now: DateTime<Utc>, goal: GoalDays) -> u8 {
    if start.is_none() {
        return 0;
    }
    let days = u64::from(days_since(start, now));
    let goal = u64::from(goal.get());
    // Integer half-up rounding of 100 * days / goal.
    let pct = (200 * days + goal) / (2 * goal);
    pct.min(100) as u8
}

/// Days counted toward the goal, for "N/goal days" displays.
pub fn goal_progress_days(days: u32, goal: GoalDays) -> u32 {
    days.min(goal.get())
}

/// Encouragement tier for the current streak length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakPhase {
    JustStarted,
    EarlyDays,
    AlmostAWeek,
    OverAWeek,
    Building,
    Achieved,
}

impl StreakPhase {
    pub fn for_days(days: u32) -> Self {
        match days {
            0 => StreakPhase::JustStarted,
            1..=2 => StreakPhase::EarlyDays,
            3..=6 => StreakPhase::AlmostAWeek,
            7..=13 => StreakPhase::OverAWeek,
            14..=29 => StreakPhase::Building,
            _ => StreakPhase::Achieved,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            StreakPhase::JustStarted => "You're just starting your journey. Stay strong!",
            StreakPhase::EarlyDays => "The first few days are the hardest. You're doing great!",
            StreakPhase::AlmostAWeek => "Almost a week! Your body is already thanking you.",
            StreakPhase::OverAWeek => "Over a week clean! Your determination is inspiring.",
            StreakPhase::Building => "You're making amazing progress. Keep going!",
            StreakPhase::Achieved => "Incredible achievement! You should be very proud.",
        }
    }
}
