//! Expiry monitor
//!
//! Background task that calls `LivenessTracker::expiry_check` on a fixed
//! period. The task stops when the shutdown channel flips to `true` or its
//! sender is dropped. Each check runs to completion inside one `select!`
//! branch, so stopping never interrupts a state transition half way.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::liveness::tracker::LivenessTracker;

pub fn spawn_expiry_monitor(
    tracker: Arc<LivenessTracker>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        debug!("expiry monitor started, period {:?}", period);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tracker.expiry_check();
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("expiry monitor stopped");
    })
}
