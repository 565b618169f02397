use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::types::MigrationStatus;

/// A named, versioned unit of schema change. Forward/rollback SQL and the
/// checksum over them are immutable after creation; only `status` and
/// `updated_at` move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "schema_migrations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub migration_name: String,

    pub version: String,

    pub description: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub forward_sql: String,

    #[sea_orm(column_type = "Text")]
    pub rollback_sql: String,

    /// SHA-256 over `forward_sql + rollback_sql`, lowercase hex
    pub checksum: String,

    /// Checksum of the preceding migration; null only for genesis
    pub prev_hash: Option<String>,

    pub chain_position: i32,

    pub is_genesis: bool,

    #[sea_orm(default_value = "PENDING")]
    pub status: MigrationStatus,

    #[sea_orm(default = "chrono::Utc::now().naive_utc()")]
    pub created_at: DateTime,

    pub updated_at: Option<DateTime>,
}

impl ActiveModel {
    pub fn set_status(&mut self, status: MigrationStatus) {
        self.status = Set(status);
        self.updated_at = Set(Some(chrono::Utc::now().naive_utc()));
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::chain_link::Entity")]
    ChainLinks,

    #[sea_orm(has_many = "super::migration_history::Entity")]
    History,
}

impl Related<super::chain_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChainLinks.def()
    }
}

impl Related<super::migration_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::History.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now().naive_utc();

        if insert {
            self.created_at = Set(now);
        } else {
            self.updated_at = Set(Some(now));
        }

        Ok(self)
    }
}
