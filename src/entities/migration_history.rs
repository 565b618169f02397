use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::types::HistoryStatus;

/// Append-only execution log, one row per attempt per environment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "schema_migration_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub migration_id: i32,

    pub environment: String,

    pub status: HistoryStatus,

    /// Driver error text for FAILED / ROLLBACK_FAILED rows
    #[sea_orm(column_type = "Text")]
    pub error: Option<String>,

    pub started_at: DateTime,

    pub duration_ms: i64,

    #[sea_orm(default = "chrono::Utc::now().naive_utc()")]
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schema_migration::Entity",
        from = "Column::MigrationId",
        to = "super::schema_migration::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Migration,
}

impl Related<super::schema_migration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Migration.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert {
            self.created_at = Set(chrono::Utc::now().naive_utc());
        }

        Ok(self)
    }
}
