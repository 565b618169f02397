use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use itertools::Itertools;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::connect::{DriverConfig, executor, normalize};
use crate::entities::{ChainLinkModel, EnvironmentModel, HistoryModel, MigrationModel};
use crate::errors::{Error, Result};
use crate::repo::{ChainRepository, EnvironmentRepository, HistoryRepository, MigrationRepository};
use crate::types::{ChainReport, HistoryStatus, MigrationSortField, MigrationStatus, SortOrder};
use crate::utils::{chain_checksum, elapsed_ms};

/// Result of a successful apply: the updated migration plus the chain link
/// it appended.
#[derive(Debug, Serialize)]
pub struct ApplyOutcome {
    pub migration: MigrationModel,
    pub link: ChainLinkModel,
}

/// Service layer for the migration hash chain. Guarantees that migrations
/// reach each environment in authoring order: the environment tail is
/// checked against the migration's recorded `prev_hash` before any SQL
/// runs, and chain mutations for one environment are serialized.
pub struct MigrationService {
    db: DatabaseConnection,
    repo: Arc<MigrationRepository>,
    chain_repo: Arc<ChainRepository>,
    history_repo: Arc<HistoryRepository>,
    environment_repo: Arc<EnvironmentRepository>,
    env_locks: DashMap<String, Arc<Mutex<()>>>,
}

fn validate_migration_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::Validation("migration_name must not be empty".to_string()));
    }
    let starts_ok = name
        .chars()
        .next()
        .map(|c| c.is_ascii_alphanumeric())
        .unwrap_or(false);
    if !starts_ok
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(Error::Validation(format!(
            "migration name '{}' may only contain letters, digits, '_', '-' and '.', and must start with a letter or digit",
            name
        )));
    }
    Ok(())
}

impl MigrationService {
    pub fn new(
        db: DatabaseConnection,
        repo: Arc<MigrationRepository>,
        chain_repo: Arc<ChainRepository>,
        history_repo: Arc<HistoryRepository>,
        environment_repo: Arc<EnvironmentRepository>,
    ) -> Self {
        Self {
            db,
            repo,
            chain_repo,
            history_repo,
            environment_repo,
            env_locks: DashMap::new(),
        }
    }

    /// Registers a new migration at the tail of the global chain. All
    /// validation happens before any row is written; forward/rollback SQL
    /// and the checksum over them are immutable afterwards.
    pub async fn create(
        &self,
        name: &str,
        version: &str,
        description: Option<&str>,
        forward_sql: &str,
        rollback_sql: &str,
    ) -> Result<MigrationModel> {
        validate_migration_name(name)?;
        if version.trim().is_empty() {
            return Err(Error::Validation("version must not be empty".to_string()));
        }
        if forward_sql.trim().is_empty() {
            return Err(Error::Validation("forward_sql must not be empty".to_string()));
        }
        if rollback_sql.trim().is_empty() {
            return Err(Error::Validation(
                "rollback_sql is mandatory; a migration without a rollback path is rejected"
                    .to_string(),
            ));
        }

        if self.repo.exists_by_name(name).await? {
            return Err(Error::Conflict(format!(
                "migration '{}' already exists",
                name
            )));
        }

        let checksum = chain_checksum(forward_sql, rollback_sql);
        let tail = self.repo.last_in_chain().await?;
        let (prev_hash, chain_position, is_genesis) = match tail {
            Some(tail) => (Some(tail.checksum), tail.chain_position + 1, false),
            None => (None, 0, true),
        };

        info!(
            "Creating migration '{}' at chain position {}",
            name, chain_position
        );

        Ok(self
            .repo
            .create(
                name,
                version,
                description,
                forward_sql,
                rollback_sql,
                &checksum,
                prev_hash,
                chain_position,
                is_genesis,
            )
            .await?)
    }

    /// Applies a migration to one environment. The chain check comes before
    /// any SQL so a stale or reordered migration can never mutate the
    /// target schema.
    pub async fn apply(&self, name: &str, environment: &str) -> Result<ApplyOutcome> {
        let lock = self.lock_for(environment);
        let _guard = lock.lock().await;

        let migration = self.get_by_name(name).await?;
        let env = self.get_environment(environment).await?;

        if self
            .chain_repo
            .find_link(environment, migration.id)
            .await?
            .is_some()
        {
            return Err(Error::Conflict(format!(
                "migration '{}' is already applied to environment '{}'",
                name, environment
            )));
        }

        let tail = self.chain_repo.latest_link(environment).await?;
        let tail_hash = tail.as_ref().map(|link| link.current_hash.clone());
        let chain_position = tail.as_ref().map(|link| link.chain_position + 1).unwrap_or(0);
        let is_genesis = tail.is_none();

        if migration.prev_hash != tail_hash {
            return Err(Error::ChainIntegrity {
                environment: environment.to_string(),
                position: chain_position,
                expected: migration.prev_hash.clone(),
                found: tail_hash,
            });
        }

        let target = self.resolve_target(&env)?;
        if let Some(config) = &target {
            executor::ensure_executable(config)?;
        }

        let started_at = Utc::now().naive_utc();
        info!(
            "Applying migration '{}' to environment '{}'",
            name, environment
        );

        match self.execute_on(&target, &migration.forward_sql).await {
            Err(err) => {
                warn!(
                    "Forward SQL for '{}' failed in '{}': {}",
                    name, environment, err
                );
                self.history_repo
                    .append(
                        migration.id,
                        environment,
                        HistoryStatus::Failed,
                        Some(err.to_string()),
                        started_at,
                        elapsed_ms(started_at),
                    )
                    .await?;
                self.repo
                    .set_status(migration.id, MigrationStatus::Failed)
                    .await?;
                Err(err)
            }
            Ok(()) => {
                let link = self
                    .chain_repo
                    .append(
                        environment,
                        migration.id,
                        migration.prev_hash.clone(),
                        &migration.checksum,
                        chain_position,
                        is_genesis,
                    )
                    .await?;
                self.history_repo
                    .append(
                        migration.id,
                        environment,
                        HistoryStatus::Applied,
                        None,
                        started_at,
                        elapsed_ms(started_at),
                    )
                    .await?;
                let migration = self
                    .repo
                    .set_status(migration.id, MigrationStatus::Applied)
                    .await?;

                Ok(ApplyOutcome { migration, link })
            }
        }
    }

    /// Runs a migration's rollback SQL against one environment. The chain
    /// link stays in place; only status and history move.
    pub async fn rollback(&self, name: &str, environment: &str) -> Result<MigrationModel> {
        let lock = self.lock_for(environment);
        let _guard = lock.lock().await;

        let migration = self.get_by_name(name).await?;
        let env = self.get_environment(environment).await?;

        // A failed rollback leaves the migration effectively applied, so
        // the operator can retry it
        let latest = self.history_repo.latest(migration.id, environment).await?;
        let currently_applied = matches!(
            latest.as_ref().map(|h| &h.status),
            Some(HistoryStatus::Applied) | Some(HistoryStatus::RollbackFailed)
        );
        if !currently_applied {
            return Err(Error::NotFound(format!(
                "migration '{}' is not applied to environment '{}'",
                name, environment
            )));
        }

        let target = self.resolve_target(&env)?;
        if let Some(config) = &target {
            executor::ensure_executable(config)?;
        }

        let started_at = Utc::now().naive_utc();
        info!(
            "Rolling back migration '{}' in environment '{}'",
            name, environment
        );

        match self.execute_on(&target, &migration.rollback_sql).await {
            Err(err) => {
                warn!(
                    "Rollback SQL for '{}' failed in '{}': {}",
                    name, environment, err
                );
                self.history_repo
                    .append(
                        migration.id,
                        environment,
                        HistoryStatus::RollbackFailed,
                        Some(err.to_string()),
                        started_at,
                        elapsed_ms(started_at),
                    )
                    .await?;
                Err(err)
            }
            Ok(()) => {
                self.history_repo
                    .append(
                        migration.id,
                        environment,
                        HistoryStatus::RolledBack,
                        None,
                        started_at,
                        elapsed_ms(started_at),
                    )
                    .await?;
                Ok(self
                    .repo
                    .set_status(migration.id, MigrationStatus::RolledBack)
                    .await?)
            }
        }
    }

    /// Walks one environment's chain links in position order and checks
    /// genesis shape, linkage and position gaps.
    pub async fn validate_chain(&self, environment: &str) -> Result<ChainReport> {
        let links = self.chain_repo.links_for(environment).await?;
        if links.is_empty() {
            return Ok(ChainReport::empty());
        }

        let total_links = links.len() as u64;
        let mut valid = true;
        let mut broken_at = None;

        if let Some(first) = links.first() {
            if !(first.is_genesis && first.prev_hash.is_none() && first.chain_position == 0) {
                valid = false;
                broken_at = Some(first.chain_position);
            }
        }

        if valid {
            for (prev, cur) in links.iter().tuple_windows() {
                if cur.prev_hash.as_deref() != Some(prev.current_hash.as_str()) {
                    valid = false;
                    broken_at = Some(cur.chain_position);
                    break;
                }
            }
        }

        let have: HashSet<i32> = links.iter().map(|link| link.chain_position).collect();
        let max = links.last().map(|link| link.chain_position).unwrap_or(0);
        let missing: Vec<i32> = (0..=max).filter(|p| !have.contains(p)).collect();
        if !missing.is_empty() {
            valid = false;
        }

        Ok(ChainReport {
            valid,
            broken_at,
            missing,
            total_links,
        })
    }

    pub async fn chain_links(&self, environment: &str) -> Result<Vec<ChainLinkModel>> {
        Ok(self.chain_repo.links_for(environment).await?)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<MigrationModel> {
        self.repo
            .find_by_name(name)
            .await?
            .ok_or_else(|| Error::NotFound(format!("migration '{}' not found", name)))
    }

    pub async fn history(
        &self,
        name: &str,
        environment: Option<&str>,
    ) -> Result<Vec<HistoryModel>> {
        let migration = self.get_by_name(name).await?;
        Ok(self
            .history_repo
            .find_for_migration(migration.id, environment)
            .await?)
    }

    pub async fn list(
        &self,
        status: Option<MigrationStatus>,
        version: Option<&str>,
        sort: MigrationSortField,
        order: SortOrder,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<MigrationModel>, u64)> {
        Ok(self
            .repo
            .fetch_migrations(status, version, sort, order, page, per_page)
            .await?)
    }

    fn lock_for(&self, environment: &str) -> Arc<Mutex<()>> {
        self.env_locks
            .entry(environment.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn get_environment(&self, name: &str) -> Result<EnvironmentModel> {
        self.environment_repo
            .find_by_name(name)
            .await?
            .ok_or_else(|| Error::NotFound(format!("environment '{}' not found", name)))
    }

    fn resolve_target(&self, env: &EnvironmentModel) -> Result<Option<DriverConfig>> {
        env.connection_string
            .as_deref()
            .map(|raw| normalize(env.engine, raw))
            .transpose()
    }

    async fn execute_on(&self, target: &Option<DriverConfig>, sql: &str) -> Result<()> {
        match target {
            Some(config) => executor::execute(config, sql).await,
            // Environments without a connection string run against the
            // local metadata database
            None => self
                .db
                .execute_unprepared(sql)
                .await
                .map(|_| ())
                .map_err(|e| {
                    Error::Database(
                        anyhow::Error::new(e).context("Metadata database rejected the statement"),
                    )
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_name_shape() {
        assert!(validate_migration_name("add_users_email_idx").is_ok());
        assert!(validate_migration_name("2026.04-fix").is_ok());
        assert!(validate_migration_name("").is_err());
        assert!(validate_migration_name("_leading_underscore").is_err());
        assert!(validate_migration_name("has spaces").is_err());
        assert!(validate_migration_name("semi;colon").is_err());
    }
}
