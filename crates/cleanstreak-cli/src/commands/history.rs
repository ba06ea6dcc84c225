use chrono::Duration;
use cleanstreak_core::{Clock, Config, MAX_HISTORY_DAYS};

use super::{open_tracker, print_json};

pub fn run(days: u32, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if days == 0 || days > MAX_HISTORY_DAYS {
        return Err(format!("--days must be between 1 and {MAX_HISTORY_DAYS}").into());
    }
    let tracker = open_tracker(config)?;

    let to = tracker.clock().today();
    let from = to
        .checked_sub_signed(Duration::days(i64::from(days) - 1))
        .ok_or("history range starts before the earliest representable date")?;
    print_json(&tracker.history(from, to)?)
}
