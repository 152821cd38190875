//! Countdown tick loop

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::timer::{IntervalController, TickOutcome};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that counts down one interval, one tick per second.
///
/// Exits on its own once the interval completes, or on the first tick after
/// the controller stops it or starts a newer loop.
pub async fn scheduler_task(controller: Arc<IntervalController>, generation: u64) {
    info!("Starting tick loop #{}", generation);

    let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    // A late tick must not be followed by a burst of catch-up ticks
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match controller.tick(generation) {
            TickOutcome::Counted | TickOutcome::Paused => {}
            TickOutcome::Completed(mode) => {
                info!("Tick loop #{} finished {:?} interval", generation, mode);
                break;
            }
            TickOutcome::Stopped => {
                debug!("Tick loop #{} stopped", generation);
                break;
            }
        }
    }
}
