use clap::Subcommand;
use cleanstreak_core::{Category, Config};

use super::{open_tracker, print_json, snapshot};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Choose what you are quitting (smoking, drinking, both)
    Select {
        category: String,
    },
    /// Start a fresh streak now
    Reset,
    /// Forget category and streak (goal and history are kept)
    Forget,
    /// Print current progress as JSON
    Status,
}

pub fn run(action: StreakAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = open_tracker(config)?;

    match action {
        StreakAction::Select { category } => {
            let category: Category = category.parse()?;
            tracker.select_category(category)?;
        }
        StreakAction::Reset => tracker.reset_streak()?,
        StreakAction::Forget => tracker.forget()?,
        StreakAction::Status => {}
    }

    print_json(&snapshot(&tracker, config))
}
