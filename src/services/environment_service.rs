use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::connect::{executor, normalize};
use crate::entities::EnvironmentModel;
use crate::errors::{Error, Result};
use crate::repo::EnvironmentRepository;
use crate::types::EngineKind;

pub fn validate_environment_name(name: &str) -> Result<()> {
    let starts_ok = name
        .chars()
        .next()
        .map(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .unwrap_or(false);
    if !starts_ok
        || !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-'))
    {
        return Err(Error::Validation(format!(
            "environment name '{}' may only contain lowercase letters, digits, '_' and '-', and must start with a letter or digit",
            name
        )));
    }
    Ok(())
}

pub struct EnvironmentService {
    db: DatabaseConnection,
    repo: Arc<EnvironmentRepository>,
}

impl EnvironmentService {
    pub fn new(db: DatabaseConnection, repo: Arc<EnvironmentRepository>) -> Self {
        Self { db, repo }
    }

    /// Registers a deployment target. A present connection string must
    /// normalize for the declared engine before anything is stored.
    pub async fn create(
        &self,
        name: &str,
        engine: EngineKind,
        connection_string: Option<&str>,
        description: Option<&str>,
    ) -> Result<EnvironmentModel> {
        validate_environment_name(name)?;
        if let Some(raw) = connection_string {
            normalize(engine, raw)?;
        }
        if self.repo.exists_by_name(name).await? {
            return Err(Error::Conflict(format!(
                "environment '{}' already exists",
                name
            )));
        }

        info!("Registering environment '{}' ({})", name, engine);
        Ok(self
            .repo
            .create(name, engine, connection_string, description)
            .await?)
    }

    pub async fn get_all(&self) -> Result<Vec<EnvironmentModel>> {
        Ok(self.repo.get_all().await?)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<EnvironmentModel> {
        self.repo
            .find_by_name(name)
            .await?
            .ok_or_else(|| Error::NotFound(format!("environment '{}' not found", name)))
    }

    pub async fn delete_by_name(&self, name: &str) -> Result<EnvironmentModel> {
        let env = self.get_by_name(name).await?;

        let deleted = self.repo.delete(env.id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!(
                "environment '{}' not found",
                name
            )));
        }

        Ok(env)
    }

    /// Round-trips a probe statement through the environment's driver, or
    /// through the metadata pool when no connection string is configured.
    pub async fn ping(&self, name: &str) -> Result<()> {
        let env = self.get_by_name(name).await?;

        match env.connection_string.as_deref() {
            Some(raw) => {
                let config = normalize(env.engine, raw)?;
                executor::ping(&config).await
            }
            None => self.db.ping().await.map_err(|e| {
                Error::Database(anyhow::Error::new(e).context("Metadata database is unreachable"))
            }),
        }
    }
}
