//! Periodic, best-effort checking of all registered targets.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::StreamExt;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::prober::Probe;
use super::recorder::Recorder;
use super::store::{SeriesStore, TargetCatalog};
use super::{Target, TargetId, Timestamp};

/// Drives the check loop: on every tick it fetches the full target list,
/// probes the targets that are due per their configured interval, and hands
/// each outcome to the recorder. A single target's failure is logged and
/// never aborts the tick or the loop.
pub struct Scheduler<C, P, S> {
    catalog: Arc<C>,
    prober: Arc<P>,
    recorder: Recorder<S>,
    tick_period: Duration,
    probe_concurrency: usize,
    last_checked: HashMap<TargetId, Timestamp>,
}

/// Handle to a spawned scheduler loop. [`SchedulerHandle::shutdown`] stops
/// new ticks and waits for the in-flight tick to finish; dropping the handle
/// also stops the loop, just without waiting for it.
pub struct SchedulerHandle {
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl SchedulerHandle {
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.handle.await;
    }
}

impl<C, P, S> Scheduler<C, P, S>
where
    C: TargetCatalog + 'static,
    P: Probe + 'static,
    S: SeriesStore + 'static,
{
    pub fn new(
        catalog: Arc<C>,
        prober: Arc<P>,
        recorder: Recorder<S>,
        tick_period: Duration,
        probe_concurrency: usize,
    ) -> Self {
        Self {
            catalog,
            prober,
            recorder,
            tick_period,
            probe_concurrency: probe_concurrency.max(1),
            last_checked: HashMap::new(),
        }
    }

    pub fn spawn(mut self) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.tick_period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            info!(tick_period = ?self.tick_period, "Scheduler started.");
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        info!("Scheduler shutting down.");
                        break;
                    }
                    _ = ticker.tick() => {
                        self.run_tick(Utc::now().timestamp()).await;
                    }
                }
            }
        });
        SchedulerHandle {
            shutdown_tx,
            handle,
        }
    }

    /// One check cycle at time `now`. Public within the crate so tests can
    /// drive single ticks deterministically instead of waiting on a timer.
    pub async fn run_tick(&mut self, now: Timestamp) {
        let targets = match self.catalog.list_all_targets().await {
            Ok(targets) => targets,
            Err(e) => {
                error!(error = %e, "Failed to list targets; skipping tick.");
                return;
            }
        };

        let due: Vec<Target> = targets
            .into_iter()
            .filter(|target| self.is_due(target, now))
            .collect();
        if due.is_empty() {
            return;
        }

        let recorder = &self.recorder;
        let checked: Vec<TargetId> = futures::stream::iter(due.into_iter().map(|target| {
            let prober = Arc::clone(&self.prober);
            async move {
                let target_id = target.id;
                match prober.probe(&target).await {
                    Ok(outcome) => {
                        if let Err(e) = recorder.record(&outcome).await {
                            error!(target_id, error = %e, "Failed to record probe outcome.");
                        }
                    }
                    Err(e) => {
                        warn!(target_id, error = %e, "Probe could not be attempted; skipping target for this tick.");
                    }
                }
                target_id
            }
        }))
        .buffer_unordered(self.probe_concurrency)
        .collect()
        .await;

        for target_id in checked {
            self.last_checked.insert(target_id, now);
        }
    }

    fn is_due(&self, target: &Target, now: Timestamp) -> bool {
        match self.last_checked.get(&target.id) {
            None => true,
            Some(&last) => now - last >= i64::from(target.interval_seconds.max(1)),
        }
    }
}
