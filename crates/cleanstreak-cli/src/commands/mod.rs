pub mod checkin;
pub mod config;
pub mod goal;
pub mod history;
pub mod streak;
pub mod watch;

use cleanstreak_core::{Config, Database, ProgressSnapshot, StreakTracker};

pub type Tracker = StreakTracker<Database>;

/// Open the tracker over the default database, honoring the configured goal default.
pub fn open_tracker(config: &Config) -> Result<Tracker, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let tracker = StreakTracker::load_with_default_goal(
        db,
        cleanstreak_core::SystemClock,
        config.default_goal()?,
    )?;
    Ok(tracker)
}

/// Snapshot with display preferences applied.
pub fn snapshot(tracker: &Tracker, config: &Config) -> ProgressSnapshot {
    let mut snap = tracker.snapshot();
    if !config.display.show_milestones {
        snap.milestones.clear();
        snap.next_milestone = None;
    }
    snap
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
