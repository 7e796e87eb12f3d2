//! Historical series queries with step decimation.

use std::sync::Arc;

use serde::Serialize;

use super::error::{QueryError, ValidationError};
use super::store::SeriesStore;
use super::{TargetId, Timestamp, UserId};

/// Caller-supplied query window. `since` is an inclusive lower bound in
/// unix seconds (default: epoch); `step` keeps every K-th sample by rank
/// (default: 1, i.e. no decimation).
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesQuery {
    pub since: Option<Timestamp>,
    pub step: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatencySeries {
    pub timestamps: Vec<Timestamp>,
    pub values_ms: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentSeries {
    pub timestamps: Vec<Timestamp>,
}

/// Answers "history of target X owned by user U since S, every K-th sample"
/// over the time-series store. Decimation is applied in memory over the
/// store's ordered scan; either the full decimated series is returned or an
/// error, never a partial result.
pub struct QueryEngine<S> {
    store: Arc<S>,
}

impl<S: SeriesStore> QueryEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn query_latencies(
        &self,
        owner: UserId,
        target_id: TargetId,
        query: SeriesQuery,
    ) -> Result<LatencySeries, QueryError> {
        let since = normalize_since(query.since)?;
        let step = normalize_step(query.step);

        let rows = self.store.scan_latencies(owner, target_id, since).await?;

        let mut series = LatencySeries {
            timestamps: Vec::new(),
            values_ms: Vec::new(),
        };
        for row in rows.into_iter().step_by(step) {
            series.timestamps.push(row.timestamp);
            series.values_ms.push(row.value_ms);
        }
        Ok(series)
    }

    /// Incidents carry no value besides occurrence, and no decimation is
    /// offered for them.
    pub async fn query_incidents(
        &self,
        owner: UserId,
        target_id: TargetId,
        since: Option<Timestamp>,
    ) -> Result<IncidentSeries, QueryError> {
        let since = normalize_since(since)?;
        let timestamps = self.store.scan_incidents(owner, target_id, since).await?;
        Ok(IncidentSeries { timestamps })
    }
}

fn normalize_since(since: Option<Timestamp>) -> Result<Timestamp, ValidationError> {
    match since {
        None => Ok(0),
        Some(s) if s < 0 => Err(ValidationError::InvalidParameter {
            name: "since",
            reason: format!("must be a non-negative unix timestamp, got {s}"),
        }),
        // Keep the bound within what the datetime-typed storage layer can
        // represent, so the conversion there is infallible.
        Some(s) if chrono::DateTime::from_timestamp(s, 0).is_none() => {
            Err(ValidationError::InvalidParameter {
                name: "since",
                reason: format!("{s} is not a representable unix timestamp"),
            })
        }
        Some(s) => Ok(s),
    }
}

/// Step 0 means "no decimation", same as step 1. `step_by` panics on 0, so
/// this must never return it.
fn normalize_step(step: Option<u64>) -> usize {
    match step {
        None | Some(0) => 1,
        Some(k) => k as usize,
    }
}
