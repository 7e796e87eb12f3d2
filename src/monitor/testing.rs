//! In-memory fakes for the store contracts and the prober, used by the
//! core's unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::error::{ProbeError, StorageError};
use super::prober::Probe;
use super::store::{LatencyRow, SeriesStore, TargetCatalog};
use super::{Classification, ProbeOutcome, Target, TargetId, Timestamp, UserId};

pub(crate) struct MemoryCatalog {
    targets: Vec<Target>,
    fail: bool,
}

impl MemoryCatalog {
    pub(crate) fn new(targets: Vec<Target>) -> Self {
        Self {
            targets,
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            targets: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl TargetCatalog for MemoryCatalog {
    async fn list_all_targets(&self) -> Result<Vec<Target>, StorageError> {
        if self.fail {
            return Err(StorageError::Unavailable("catalog offline".to_string()));
        }
        Ok(self.targets.clone())
    }
}

#[derive(Default)]
pub(crate) struct MemorySeriesStore {
    latencies: Mutex<Vec<(UserId, TargetId, Timestamp, i64)>>,
    incidents: Mutex<Vec<(UserId, TargetId, Timestamp)>>,
    append_failure: Mutex<Option<TargetId>>,
    scan_failure: Mutex<Option<TargetId>>,
}

impl MemorySeriesStore {
    pub(crate) fn fail_appends_for(&self, target_id: TargetId) {
        *self.append_failure.lock().unwrap() = Some(target_id);
    }

    pub(crate) fn fail_scans_for(&self, target_id: TargetId) {
        *self.scan_failure.lock().unwrap() = Some(target_id);
    }

    fn check_append(&self, target_id: TargetId) -> Result<(), StorageError> {
        if *self.append_failure.lock().unwrap() == Some(target_id) {
            return Err(StorageError::Unavailable("append rejected".to_string()));
        }
        Ok(())
    }

    fn check_scan(&self, target_id: TargetId) -> Result<(), StorageError> {
        if *self.scan_failure.lock().unwrap() == Some(target_id) {
            return Err(StorageError::Unavailable("scan rejected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SeriesStore for MemorySeriesStore {
    async fn append_latency(
        &self,
        owner: UserId,
        target_id: TargetId,
        timestamp: Timestamp,
        value_ms: i64,
    ) -> Result<(), StorageError> {
        self.check_append(target_id)?;
        self.latencies
            .lock()
            .unwrap()
            .push((owner, target_id, timestamp, value_ms));
        Ok(())
    }

    async fn append_incident(
        &self,
        owner: UserId,
        target_id: TargetId,
        timestamp: Timestamp,
    ) -> Result<(), StorageError> {
        self.check_append(target_id)?;
        self.incidents
            .lock()
            .unwrap()
            .push((owner, target_id, timestamp));
        Ok(())
    }

    async fn scan_latencies(
        &self,
        owner: UserId,
        target_id: TargetId,
        since: Timestamp,
    ) -> Result<Vec<LatencyRow>, StorageError> {
        self.check_scan(target_id)?;
        let mut rows: Vec<LatencyRow> = self
            .latencies
            .lock()
            .unwrap()
            .iter()
            .filter(|(o, t, ts, _)| *o == owner && *t == target_id && *ts >= since)
            .map(|&(_, _, timestamp, value_ms)| LatencyRow {
                timestamp,
                value_ms,
            })
            .collect();
        rows.sort_by_key(|row| row.timestamp);
        Ok(rows)
    }

    async fn scan_incidents(
        &self,
        owner: UserId,
        target_id: TargetId,
        since: Timestamp,
    ) -> Result<Vec<Timestamp>, StorageError> {
        self.check_scan(target_id)?;
        let mut timestamps: Vec<Timestamp> = self
            .incidents
            .lock()
            .unwrap()
            .iter()
            .filter(|(o, t, ts)| *o == owner && *t == target_id && *ts >= since)
            .map(|&(_, _, ts)| ts)
            .collect();
        timestamps.sort_unstable();
        Ok(timestamps)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum ProbeScript {
    Up { latency_ms: i64 },
    Down,
    /// The probe cannot be attempted at all, e.g. a malformed URL.
    Broken,
}

pub(crate) struct ScriptedProbe {
    scripts: HashMap<TargetId, ProbeScript>,
}

impl ScriptedProbe {
    pub(crate) fn new(scripts: impl IntoIterator<Item = (TargetId, ProbeScript)>) -> Self {
        Self {
            scripts: scripts.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Probe for ScriptedProbe {
    async fn probe(&self, target: &Target) -> Result<ProbeOutcome, ProbeError> {
        let script = self
            .scripts
            .get(&target.id)
            .copied()
            .unwrap_or(ProbeScript::Broken);
        let classification = match script {
            ProbeScript::Up { latency_ms } => Classification::Success { latency_ms },
            ProbeScript::Down => Classification::Failure,
            ProbeScript::Broken => {
                return Err(ProbeError::InvalidTarget(target.url.clone()));
            }
        };
        Ok(ProbeOutcome {
            target_id: target.id,
            owner: target.owner,
            timestamp: Utc::now().timestamp(),
            classification,
        })
    }
}
