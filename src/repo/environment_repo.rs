use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

use crate::entities::{
    EnvironmentActiveModel, EnvironmentColumn, EnvironmentModel, EnvironmentsEntity,
};
use crate::types::EngineKind;

pub struct EnvironmentRepository {
    db: DatabaseConnection,
}

impl EnvironmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<EnvironmentModel>> {
        EnvironmentsEntity::find()
            .all(&self.db)
            .await
            .context("Failed to get all environments")
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<EnvironmentModel>> {
        EnvironmentsEntity::find()
            .filter(EnvironmentColumn::Name.eq(name))
            .one(&self.db)
            .await
            .context(format!("Failed to find environment by name: {}", name))
    }

    pub async fn exists_by_name(&self, name: &str) -> Result<bool> {
        Ok(self.find_by_name(name).await?.is_some())
    }

    pub async fn create(
        &self,
        name: &str,
        engine: EngineKind,
        connection_string: Option<&str>,
        description: Option<&str>,
    ) -> Result<EnvironmentModel> {
        let active_model = EnvironmentActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            engine: Set(engine),
            connection_string: Set(connection_string.map(|s| s.to_string())),
            description: Set(description.map(|s| s.to_string())),
            ..Default::default()
        };

        active_model
            .insert(&self.db)
            .await
            .context(format!("Failed to create environment '{}'", name))
    }

    pub async fn delete(&self, id: i32) -> Result<u64> {
        let res = EnvironmentsEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected)
    }

    pub async fn delete_all(&self) -> Result<u64> {
        Ok(EnvironmentsEntity::delete_many()
            .exec(&self.db)
            .await?
            .rows_affected)
    }
}
