use chrono::NaiveDate;
use clap::Subcommand;
use cleanstreak_core::Config;

use super::{open_tracker, print_json};

#[derive(Subcommand)]
pub enum CheckinAction {
    /// It happened today (resets the streak)
    Yes {
        /// Day to record instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Clean day
    No {
        /// Day to record instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn run(action: CheckinAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = open_tracker(config)?;

    let (occurred, date) = match action {
        CheckinAction::Yes { date } => (true, date),
        CheckinAction::No { date } => (false, date),
    };
    let status = match date {
        Some(date) => tracker.check_in(date, occurred)?,
        None => tracker.check_in_today(occurred)?,
    };

    print_json(&status)
}
