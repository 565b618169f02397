use anyhow::Context as _;
use sea_orm::{ConnectionTrait, Database};
use tracing::debug;

use crate::connect::normalizer::DriverConfig;
use crate::connect::oracle::OracleClient;
use crate::errors::{Error, Result};

/// Engines the control plane can execute SQL against directly. MSSQL and
/// MongoDB configurations are parsed for dispatch to the sync engine binary
/// but have no embedded driver here.
pub fn ensure_executable(config: &DriverConfig) -> Result<()> {
    match config {
        DriverConfig::Mssql(_) | DriverConfig::MongoDb(_) => {
            Err(Error::UnsupportedEngine(config.engine_name().to_string()))
        }
        _ => Ok(()),
    }
}

/// Runs one statement against the target described by `config`. Pools are
/// opened per call and closed best-effort afterwards; a close failure must
/// not mask the statement outcome.
pub async fn execute(config: &DriverConfig, sql: &str) -> Result<()> {
    ensure_executable(config)?;

    match config {
        DriverConfig::Postgres(target) | DriverConfig::MariaDb(target) => {
            execute_sqlx(&target.url, sql).await
        }
        DriverConfig::Oracle(target) => {
            let client =
                OracleClient::connect(&target.username, &target.password, &target.connect_string)?;
            client.execute(sql)
        }
        DriverConfig::Mssql(_) | DriverConfig::MongoDb(_) => {
            Err(Error::UnsupportedEngine(config.engine_name().to_string()))
        }
    }
}

/// Connectivity probe for the environment ping endpoint.
pub async fn ping(config: &DriverConfig) -> Result<()> {
    ensure_executable(config)?;

    match config {
        DriverConfig::Postgres(target) | DriverConfig::MariaDb(target) => {
            execute_sqlx(&target.url, "SELECT 1").await
        }
        DriverConfig::Oracle(target) => {
            let client =
                OracleClient::connect(&target.username, &target.password, &target.connect_string)?;
            client.ping()
        }
        DriverConfig::Mssql(_) | DriverConfig::MongoDb(_) => {
            Err(Error::UnsupportedEngine(config.engine_name().to_string()))
        }
    }
}

async fn execute_sqlx(url: &str, sql: &str) -> Result<()> {
    debug!("Opening ad-hoc target connection");
    let db = Database::connect(url)
        .await
        .context("Failed to connect to target database")
        .map_err(Error::Database)?;

    let result = db.execute_unprepared(sql).await;
    if let Err(e) = db.close().await {
        debug!("Failed to close ad-hoc target connection: {}", e);
    }

    result
        .map(|_| ())
        .map_err(|e| Error::Database(anyhow::Error::new(e).context("Target database rejected the statement")))
}
