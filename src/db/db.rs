use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::debug;

use crate::config::Settings;

/// Opens the shared metadata pool. On PostgreSQL the control-plane tables
/// live in a dedicated schema, so the search path is pinned and the schema
/// is created when absent; SQLite (tests) has no schema support.
pub async fn init_db(settings: &Settings) -> Result<DatabaseConnection> {
    let is_postgres = settings.database.url.starts_with("postgres");

    let mut options = ConnectOptions::new(settings.database.url.as_str());
    if is_postgres {
        options.set_schema_search_path(settings.database.schema.as_str());
    }

    let db = Database::connect(options)
        .await
        .context("Failed to connect to the metadata database")?;

    if is_postgres {
        let stmt = format!(
            "CREATE SCHEMA IF NOT EXISTS \"{}\"",
            settings.database.schema
        );
        debug!("Ensuring metadata schema: {}", stmt);
        db.execute_unprepared(&stmt)
            .await
            .context("Failed to create the metadata schema")?;
    }

    Ok(db)
}
