//! Service for managing registered targets.
//!
//! CRUD over the relational target catalog, plus the read-only
//! [`TargetCatalog`] view the scheduler consumes.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, DeleteResult, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::db::entities::{prelude::*, target};
use crate::monitor::error::StorageError;
use crate::monitor::store::TargetCatalog;
use crate::monitor::{self, TargetId, UserId};
use crate::web::models::CreateTarget;

pub async fn create_target(
    db: &DatabaseConnection,
    user_id: UserId,
    payload: CreateTarget,
) -> Result<target::Model, DbErr> {
    let new_target = target::ActiveModel {
        user_id: Set(user_id),
        name: Set(payload.name),
        url: Set(payload.url),
        interval_seconds: Set(payload.interval_seconds.unwrap_or(60)),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    new_target.insert(db).await
}

pub async fn get_targets_by_user_id(
    db: &DatabaseConnection,
    user_id: UserId,
) -> Result<Vec<target::Model>, DbErr> {
    Target::find()
        .filter(target::Column::UserId.eq(user_id))
        .order_by_asc(target::Column::Id)
        .all(db)
        .await
}

pub async fn get_user_target(
    db: &DatabaseConnection,
    user_id: UserId,
    target_id: TargetId,
) -> Result<Option<target::Model>, DbErr> {
    Target::find_by_id(target_id)
        .filter(target::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Deletes a target owned by the user. The samples and incidents recorded
/// for it go with it through the foreign-key cascade.
pub async fn delete_target(
    db: &DatabaseConnection,
    user_id: UserId,
    target_id: TargetId,
) -> Result<DeleteResult, DbErr> {
    Target::delete_many()
        .filter(target::Column::Id.eq(target_id))
        .filter(target::Column::UserId.eq(user_id))
        .exec(db)
        .await
}

/// Read-only catalog view for the scheduler: the full target list across
/// all users, as plain snapshots.
#[derive(Clone)]
pub struct PgTargetCatalog {
    db: DatabaseConnection,
}

impl PgTargetCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TargetCatalog for PgTargetCatalog {
    async fn list_all_targets(&self) -> Result<Vec<monitor::Target>, StorageError> {
        let targets = Target::find().all(&self.db).await?;
        Ok(targets
            .into_iter()
            .map(|model| monitor::Target {
                id: model.id,
                owner: model.user_id,
                name: model.name,
                url: model.url,
                interval_seconds: model.interval_seconds,
            })
            .collect())
    }
}
