mod category;
mod engine;
pub mod milestones;
pub mod progress;
mod state;

pub use category::Category;
pub use engine::{ProgressSnapshot, StreakTracker, MAX_HISTORY_DAYS};
pub use milestones::Milestone;
pub use progress::{GoalDays, StreakPhase};
pub use state::{Change, CheckIn, DayRecord, DayStatus, TrackerState, Transition};
