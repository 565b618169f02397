use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// One recorded application of a migration to one environment. Links are
/// appended on successful apply and never removed; rollback only touches
/// migration status and history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "schema_migration_chain")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub environment: String,

    pub migration_id: i32,

    /// `current_hash` of the previous link in this environment's chain;
    /// null only for genesis
    pub prev_hash: Option<String>,

    /// Equal to the migration's checksum
    pub current_hash: String,

    pub chain_position: i32,

    pub is_genesis: bool,

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
