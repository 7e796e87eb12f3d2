//! Translates probe outcomes into persisted time-series rows.

use std::sync::Arc;

use super::error::StorageError;
use super::store::SeriesStore;
use super::{Classification, ProbeOutcome};

/// Appends exactly one row per outcome: a latency sample for a successful
/// probe, an incident for a failed one. Each append stands alone; there is
/// no cross-target transaction, so one target's storage failure never
/// blocks another's write.
pub struct Recorder<S> {
    store: Arc<S>,
}

impl<S: SeriesStore> Recorder<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn record(&self, outcome: &ProbeOutcome) -> Result<(), StorageError> {
        match outcome.classification {
            Classification::Success { latency_ms } => {
                self.store
                    .append_latency(outcome.owner, outcome.target_id, outcome.timestamp, latency_ms)
                    .await
            }
            Classification::Failure => {
                self.store
                    .append_incident(outcome.owner, outcome.target_id, outcome.timestamp)
                    .await
            }
        }
    }
}
