use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};

use super::run_cycle::{RunSyncCycle, SyncMode};

/// Runs scheduled sync cycles on a fixed interval until shutdown.
pub struct SyncScheduler {
    cycle: RunSyncCycle,
    interval: Duration,
}

impl SyncScheduler {
    /// A zero interval is raised to one second.
    pub fn new(cycle: RunSyncCycle, interval: Duration) -> Self {
        Self {
            cycle,
            interval: interval.max(Duration::from_secs(1)),
        }
    }

    /// Loops until `shutdown` carries `true` or its sender is dropped.
    ///
    /// The first cycle runs immediately. A failing cycle is logged and the
    /// loop keeps going.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = self.interval.as_secs(), "Sync scheduler started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(err) = self.cycle.execute(SyncMode::Scheduled).await {
                        warn!(error = %err, "Scheduled sync failed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Sync scheduler stopped");
    }
}
