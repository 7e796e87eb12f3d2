//! Contracts between the core and its storage collaborators.
//!
//! The scheduler reads the target catalog; the recorder appends to and the
//! query engine scans the time-series store. Postgres-backed implementations
//! live in `crate::db::services`; tests use in-memory fakes.

use async_trait::async_trait;

use super::error::StorageError;
use super::{Target, TargetId, Timestamp, UserId};

/// One persisted latency sample, as returned by an ordered scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyRow {
    pub timestamp: Timestamp,
    pub value_ms: i64,
}

/// Read-only view of the relational target catalog.
#[async_trait]
pub trait TargetCatalog: Send + Sync {
    async fn list_all_targets(&self) -> Result<Vec<Target>, StorageError>;
}

/// Append-only time-series store, partitioned by `(owner, target_id)`.
///
/// Appends are single-row writes; scans return rows with
/// `timestamp >= since` in ascending timestamp order. The store orders on
/// read, not on write.
#[async_trait]
pub trait SeriesStore: Send + Sync {
    async fn append_latency(
        &self,
        owner: UserId,
        target_id: TargetId,
        timestamp: Timestamp,
        value_ms: i64,
    ) -> Result<(), StorageError>;

    async fn append_incident(
        &self,
        owner: UserId,
        target_id: TargetId,
        timestamp: Timestamp,
    ) -> Result<(), StorageError>;

    async fn scan_latencies(
        &self,
        owner: UserId,
        target_id: TargetId,
        since: Timestamp,
    ) -> Result<Vec<LatencyRow>, StorageError>;

    async fn scan_incidents(
        &self,
        owner: UserId,
        target_id: TargetId,
        since: Timestamp,
    ) -> Result<Vec<Timestamp>, StorageError>;
}
