use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::entities::{MigrationActiveModel, MigrationColumn, MigrationModel, MigrationsEntity};
use crate::types::{MigrationSortField, MigrationStatus, SortOrder};

pub struct MigrationRepository {
    db: DatabaseConnection,
}

impl MigrationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<MigrationModel>> {
        MigrationsEntity::find()
            .filter(MigrationColumn::MigrationName.eq(name))
            .one(&self.db)
            .await
            .context(format!("Failed to find migration by name: {}", name))
    }

    pub async fn exists_by_name(&self, name: &str) -> Result<bool> {
        Ok(self.find_by_name(name).await?.is_some())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<MigrationModel> {
        MigrationsEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .context(format!("Migration with ID {} not found", id))
    }

    /// Global chain tail, i.e. the migration with the highest position.
    /// Chain placement is assigned here at creation time; the
    /// environment-specific tail is re-checked at apply time.
    pub async fn last_in_chain(&self) -> Result<Option<MigrationModel>> {
        MigrationsEntity::find()
            .order_by_desc(MigrationColumn::ChainPosition)
            .one(&self.db)
            .await
            .context("Failed to read the migration chain tail")
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: &str,
        version: &str,
        description: Option<&str>,
        forward_sql: &str,
        rollback_sql: &str,
        checksum: &str,
        prev_hash: Option<String>,
        chain_position: i32,
        is_genesis: bool,
    ) -> Result<MigrationModel> {
        let active_model = MigrationActiveModel {
            id: NotSet,
            migration_name: Set(name.to_string()),
            version: Set(version.to_string()),
            description: Set(description.map(|s| s.to_string())),
            forward_sql: Set(forward_sql.to_string()),
            rollback_sql: Set(rollback_sql.to_string()),
            checksum: Set(checksum.to_string()),
            prev_hash: Set(prev_hash),
            chain_position: Set(chain_position),
            is_genesis: Set(is_genesis),
            ..Default::default()
        };

        active_model
            .insert(&self.db)
            .await
            .context(format!("Failed to create migration '{}'", name))
    }

    pub async fn set_status(&self, id: i32, status: MigrationStatus) -> Result<MigrationModel> {
        let migration = self.get_by_id(id).await?;
        let mut active: MigrationActiveModel = migration.into();
        active.set_status(status);

        active
            .update(&self.db)
            .await
            .context(format!("Failed to update status for migration {}", id))
    }

    pub async fn fetch_migrations(
        &self,
        status: Option<MigrationStatus>,
        version: Option<&str>,
        sort: MigrationSortField,
        order: SortOrder,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<MigrationModel>, u64)> {
        let mut query = MigrationsEntity::find();

        if let Some(status) = status {
            query = query.filter(MigrationColumn::Status.eq(status));
        }
        if let Some(version) = version {
            query = query.filter(MigrationColumn::Version.eq(version));
        }

        let column = match sort {
            MigrationSortField::Name => MigrationColumn::MigrationName,
            MigrationSortField::Version => MigrationColumn::Version,
            MigrationSortField::ChainPosition => MigrationColumn::ChainPosition,
            MigrationSortField::CreatedAt => MigrationColumn::CreatedAt,
        };
        query = match order {
            SortOrder::Asc => query.order_by_asc(column),
            SortOrder::Desc => query.order_by_desc(column),
        };

        let paginator = query.paginate(&self.db, per_page.max(1));
        let total = paginator.num_items().await.context("Failed to count migrations")?;
        let data = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .context("Failed to fetch migrations page")?;

        Ok((data, total))
    }
}
