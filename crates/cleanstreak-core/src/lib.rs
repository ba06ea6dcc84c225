//! # cleanstreak Core Library
//!
//! This library provides the core business logic for the cleanstreak habit tracker.
//! A user picks what they are quitting, the tracker stamps the start of a clean
//! streak, and a daily check-in either confirms a clean day or resets the streak.
//! The CLI binary is a thin presentation layer over the same library.
//!
//! ## Architecture
//!
//! - **Streak Tracker**: A wall-clock-based state machine. Pure transitions on
//!   [`TrackerState`] produce [`Change`] lists; the [`StreakTracker`] handle applies
//!   them through the persistence adapter before committing in memory
//! - **Storage**: Key-value persistence (SQLite or in-memory) and TOML-based configuration
//! - **Clock**: Injectable time source so day boundaries can be simulated
//! - **Day Rollover**: Cancellable tokio task firing at local midnight
//!
//! ## Key Components
//!
//! - [`StreakTracker`]: Tracker handle owning store and clock
//! - [`Database`]: SQLite-backed [`KeyValueStore`]
//! - [`Config`]: Application configuration management
//! - [`DayRollover`]: Scheduled day-boundary re-evaluation

pub mod clock;
pub mod error;
pub mod rollover;
pub mod storage;
pub mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, SchedulerError, StorageError, ValidationError};
pub use rollover::DayRollover;
pub use storage::{Config, Database, KeyValueStore, MemoryStore};
pub use tracker::{
    Category, Change, CheckIn, DayRecord, DayStatus, GoalDays, Milestone, ProgressSnapshot,
    StreakPhase, StreakTracker, TrackerState, Transition, MAX_HISTORY_DAYS,
};
