use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::entities::{HistoryActiveModel, HistoryColumn, HistoryEntity, HistoryModel};
use crate::types::HistoryStatus;

/// Execution log access. Rows are only ever inserted; there is no update or
/// delete path through this repository.
pub struct HistoryRepository {
    db: DatabaseConnection,
}

impl HistoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn append(
        &self,
        migration_id: i32,
        environment: &str,
        status: HistoryStatus,
        error: Option<String>,
        started_at: NaiveDateTime,
        duration_ms: i64,
    ) -> Result<HistoryModel> {
        let active_model = HistoryActiveModel {
            id: NotSet,
            migration_id: Set(migration_id),
            environment: Set(environment.to_string()),
            status: Set(status),
            error: Set(error),
            started_at: Set(started_at),
            duration_ms: Set(duration_ms),
            ..Default::default()
        };

        active_model.insert(&self.db).await.context(format!(
            "Failed to append history for migration {} in '{}'",
            migration_id, environment
        ))
    }

    /// Most recent attempt for the pair; decides whether a rollback is
    /// currently possible.
    pub async fn latest(
        &self,
        migration_id: i32,
        environment: &str,
    ) -> Result<Option<HistoryModel>> {
        HistoryEntity::find()
            .filter(HistoryColumn::MigrationId.eq(migration_id))
            .filter(HistoryColumn::Environment.eq(environment))
            .order_by_desc(HistoryColumn::Id)
            .one(&self.db)
            .await
            .context(format!(
                "Failed to read latest history for migration {} in '{}'",
                migration_id, environment
            ))
    }

    pub async fn find_for_migration(
        &self,
        migration_id: i32,
        environment: Option<&str>,
    ) -> Result<Vec<HistoryModel>> {
        let mut query = HistoryEntity::find().filter(HistoryColumn::MigrationId.eq(migration_id));
        if let Some(environment) = environment {
            query = query.filter(HistoryColumn::Environment.eq(environment));
        }

        query
            .order_by_desc(HistoryColumn::Id)
            .all(&self.db)
            .await
            .context(format!(
                "Failed to fetch history for migration {}",
                migration_id
            ))
    }

    pub async fn count_for(&self, migration_id: i32, environment: &str) -> Result<u64> {
        HistoryEntity::find()
            .filter(HistoryColumn::MigrationId.eq(migration_id))
            .filter(HistoryColumn::Environment.eq(environment))
            .count(&self.db)
            .await
            .context(format!(
                "Failed to count history for migration {} in '{}'",
                migration_id, environment
            ))
    }
}
