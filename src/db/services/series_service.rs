//! Postgres-backed implementation of the time-series store contract.
//!
//! Rows live in `latency_samples` and `incidents`, both indexed on
//! `(user_id, target_id, time)` so the ordered partition scan the recorder
//! and query engine depend on stays cheap.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::db::entities::{incident, latency_sample};
use crate::monitor::error::StorageError;
use crate::monitor::store::{LatencyRow, SeriesStore};
use crate::monitor::{TargetId, Timestamp, UserId};

#[derive(Clone)]
pub struct PgSeriesStore {
    db: DatabaseConnection,
}

fn to_datetime(timestamp: Timestamp) -> Result<chrono::DateTime<chrono::Utc>, StorageError> {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .ok_or(StorageError::TimestampOutOfRange(timestamp))
}

impl PgSeriesStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SeriesStore for PgSeriesStore {
    async fn append_latency(
        &self,
        owner: UserId,
        target_id: TargetId,
        timestamp: Timestamp,
        value_ms: i64,
    ) -> Result<(), StorageError> {
        let row = latency_sample::ActiveModel {
            user_id: Set(owner),
            target_id: Set(target_id),
            time: Set(to_datetime(timestamp)?),
            value_ms: Set(value_ms),
            ..Default::default()
        };
        row.insert(&self.db).await?;
        Ok(())
    }

    async fn append_incident(
        &self,
        owner: UserId,
        target_id: TargetId,
        timestamp: Timestamp,
    ) -> Result<(), StorageError> {
        let row = incident::ActiveModel {
            user_id: Set(owner),
            target_id: Set(target_id),
            time: Set(to_datetime(timestamp)?),
            ..Default::default()
        };
        row.insert(&self.db).await?;
        Ok(())
    }

    async fn scan_latencies(
        &self,
        owner: UserId,
        target_id: TargetId,
        since: Timestamp,
    ) -> Result<Vec<LatencyRow>, StorageError> {
        let rows = latency_sample::Entity::find()
            .filter(latency_sample::Column::UserId.eq(owner))
            .filter(latency_sample::Column::TargetId.eq(target_id))
            .filter(latency_sample::Column::Time.gte(to_datetime(since)?))
            .order_by_asc(latency_sample::Column::Time)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| LatencyRow {
                timestamp: row.time.timestamp(),
                value_ms: row.value_ms,
            })
            .collect())
    }

    async fn scan_incidents(
        &self,
        owner: UserId,
        target_id: TargetId,
        since: Timestamp,
    ) -> Result<Vec<Timestamp>, StorageError> {
        let rows = incident::Entity::find()
            .filter(incident::Column::UserId.eq(owner))
            .filter(incident::Column::TargetId.eq(target_id))
            .filter(incident::Column::Time.gte(to_datetime(since)?))
            .order_by_asc(incident::Column::Time)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|row| row.time.timestamp()).collect())
    }
}
