pub mod environment_service;
pub mod migration_service;

use std::sync::Arc;

use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;

pub use environment_service::EnvironmentService;
pub use migration_service::{ApplyOutcome, MigrationService};

use crate::{
    config::Settings,
    db::init_db,
    repo::{ChainRepository, EnvironmentRepository, HistoryRepository, MigrationRepository},
    runner::EngineRunner,
};

pub struct AppServices {
    /// Shared metadata pool; also the execution target for environments
    /// without their own connection string
    pub db: DatabaseConnection,
    pub migration_service: MigrationService,
    pub environment_service: EnvironmentService,
    pub runner: EngineRunner,
}

impl AppServices {
    pub async fn new(settings: &Settings) -> Result<Self> {
        let db = init_db(settings)
            .await
            .context("Failed to initialize the metadata database")?;

        let migration_repo = Arc::new(MigrationRepository::new(db.clone()));
        let chain_repo = Arc::new(ChainRepository::new(db.clone()));
        let history_repo = Arc::new(HistoryRepository::new(db.clone()));
        let environment_repo = Arc::new(EnvironmentRepository::new(db.clone()));

        Ok(Self {
            migration_service: MigrationService::new(
                db.clone(),
                migration_repo,
                chain_repo,
                history_repo,
                environment_repo.clone(),
            ),
            environment_service: EnvironmentService::new(db.clone(), environment_repo),
            runner: EngineRunner::new(&settings.engine),
            db,
        })
    }
}
