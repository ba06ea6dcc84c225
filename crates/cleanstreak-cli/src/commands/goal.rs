use clap::Subcommand;
use cleanstreak_core::Config;

use super::open_tracker;

#[derive(Subcommand)]
pub enum GoalAction {
    /// Print the current goal in days
    Get,
    /// Set the goal in days
    Set {
        #[arg(allow_hyphen_values = true)]
        days: i64,
    },
}

pub fn run(action: GoalAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = open_tracker(config)?;

    match action {
        GoalAction::Get => println!("{}", tracker.goal_days()),
        GoalAction::Set { days } => {
            tracker.set_goal_days(days)?;
            println!("{}", tracker.goal_days());
        }
    }
    Ok(())
}
