use std::sync::{Arc, Mutex};

use cleanstreak_core::{Config, DayRollover, SystemClock};

use super::{open_tracker, print_json, snapshot};

pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = Arc::new(Mutex::new(open_tracker(config)?));
    {
        let t = tracker.lock().map_err(|_| "tracker lock poisoned")?;
        print_json(&snapshot(&t, config))?;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let mut rollover = DayRollover::new(config.rollover_period())?;
        let shared = Arc::clone(&tracker);
        let display = config.clone();
        rollover.start(&SystemClock, move || {
            let Ok(mut t) = shared.lock() else {
                tracing::error!("tracker lock poisoned, skipping rollover");
                return;
            };
            // Another process may have checked in or reset since the last tick.
            if let Err(e) = t.day_rollover().and_then(|_| t.reload()) {
                tracing::error!(error = %e, "day rollover failed");
                return;
            }
            if let Err(e) = print_json(&snapshot(&t, &display)) {
                tracing::error!(error = %e, "failed to print snapshot");
            }
        })?;

        tokio::signal::ctrl_c().await?;
        rollover.stop();
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
