//! Expiry Sweep Task
//!
//! Background task that periodically removes records past the store's
//! maximum age.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::store::KvStore;

/// Shortest period the sweep will run at; a zero period is raised to this.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

// == Sweep Handle ==
/// Owns a running sweep task.
///
/// Dropping the handle stops the task; [`SweepHandle::shutdown`] also waits
/// for it to finish.
#[derive(Debug)]
pub struct SweepHandle {
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl SweepHandle {
    /// Signals the task to stop without waiting for it.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Signals the task to stop and waits until it has exited.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        info!("Expiry sweep stopped");
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for SweepHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawns the periodic sweep over `store`.
///
/// The first sweep runs one full `interval` after spawning, then once per
/// `interval`. Each sweep takes the store's exclusive lock. A zero
/// `interval` is raised to [`MIN_SWEEP_INTERVAL`].
///
/// # Example
/// ```ignore
/// let store = Arc::new(KvStore::new(Duration::from_secs(86400), OverwritePolicy::Refresh));
/// let sweep = spawn_sweep_task(store.clone(), Duration::from_secs(86400));
/// // Later, during shutdown:
/// sweep.shutdown().await;
/// ```
pub fn spawn_sweep_task(store: Arc<KvStore>, interval: Duration) -> SweepHandle {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(sweep_loop(store, interval, shutdown_rx));

    SweepHandle {
        shutdown_tx,
        task: Some(task),
    }
}

async fn sweep_loop(store: Arc<KvStore>, period: Duration, mut shutdown_rx: watch::Receiver<bool>) {
    if period < MIN_SWEEP_INTERVAL {
        warn!(?period, "Sweep interval too short, using {:?}", MIN_SWEEP_INTERVAL);
    }
    let period = period.max(MIN_SWEEP_INTERVAL);

    info!(
        interval_secs = period.as_secs(),
        max_age_secs = store.max_age().as_secs(),
        "Starting expiry sweep"
    );

    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    debug!("Expiry sweep received shutdown signal");
                    return;
                }
                continue;
            }
        }

        let removed = store.sweep().await;
        if removed > 0 {
            info!(removed, "Expiry sweep removed stale records");
        } else {
            debug!("Expiry sweep found nothing to remove");
        }
    }
}
