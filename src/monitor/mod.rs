//! The target-checking core: scheduler, prober, recorder and the
//! time-series query engine, plus the store contracts they share.

pub mod error;
pub mod prober;
pub mod query;
pub mod recorder;
pub mod scheduler;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub type UserId = i32;
pub type TargetId = i32;

/// Unix-epoch seconds. All core timestamps use this; the database layer
/// converts to and from `chrono` at its boundary.
pub type Timestamp = i64;

/// Read-only snapshot of a registered target, fetched from the catalog
/// once per scheduling decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: TargetId,
    pub owner: UserId,
    pub name: String,
    pub url: String,
    pub interval_seconds: i32,
}

/// How a single probe turned out. Latency exists only for a successful
/// probe, so it lives inside the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Success { latency_ms: i64 },
    Failure,
}

/// Transient result of one probe against one target. Produced by a
/// [`prober::Probe`], consumed by the [`recorder::Recorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub target_id: TargetId,
    pub owner: UserId,
    pub timestamp: Timestamp,
    pub classification: Classification,
}
