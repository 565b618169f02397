use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::entities::{ChainLinkActiveModel, ChainLinkColumn, ChainLinkModel, ChainLinksEntity};

pub struct ChainRepository {
    db: DatabaseConnection,
}

impl ChainRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_link(
        &self,
        environment: &str,
        migration_id: i32,
    ) -> Result<Option<ChainLinkModel>> {
        ChainLinksEntity::find()
            .filter(ChainLinkColumn::Environment.eq(environment))
            .filter(ChainLinkColumn::MigrationId.eq(migration_id))
            .one(&self.db)
            .await
            .context(format!(
                "Failed to find chain link for migration {} in '{}'",
                migration_id, environment
            ))
    }

    /// Tail of one environment's chain, i.e. the link with the highest
    /// position.
    pub async fn latest_link(&self, environment: &str) -> Result<Option<ChainLinkModel>> {
        ChainLinksEntity::find()
            .filter(ChainLinkColumn::Environment.eq(environment))
            .order_by_desc(ChainLinkColumn::ChainPosition)
            .one(&self.db)
            .await
            .context(format!("Failed to read the chain tail for '{}'", environment))
    }

    pub async fn links_for(&self, environment: &str) -> Result<Vec<ChainLinkModel>> {
        ChainLinksEntity::find()
            .filter(ChainLinkColumn::Environment.eq(environment))
            .order_by_asc(ChainLinkColumn::ChainPosition)
            .all(&self.db)
            .await
            .context(format!("Failed to fetch chain links for '{}'", environment))
    }

    pub async fn count_for(&self, environment: &str) -> Result<u64> {
        ChainLinksEntity::find()
            .filter(ChainLinkColumn::Environment.eq(environment))
            .count(&self.db)
            .await
            .context(format!("Failed to count chain links for '{}'", environment))
    }

    pub async fn append(
        &self,
        environment: &str,
        migration_id: i32,
        prev_hash: Option<String>,
        current_hash: &str,
        chain_position: i32,
        is_genesis: bool,
    ) -> Result<ChainLinkModel> {
        let active_model = ChainLinkActiveModel {
            id: NotSet,
            environment: Set(environment.to_string()),
            migration_id: Set(migration_id),
            prev_hash: Set(prev_hash),
            current_hash: Set(current_hash.to_string()),
            chain_position: Set(chain_position),
            is_genesis: Set(is_genesis),
            ..Default::default()
        };

        active_model.insert(&self.db).await.context(format!(
            "Failed to append chain link for migration {} in '{}'",
            migration_id, environment
        ))
    }
}
