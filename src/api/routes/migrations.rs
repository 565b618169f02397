use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use validator::Validate;
use validator_derive::Validate;

use crate::api::state::SharedState;
use crate::entities::{HistoryModel, MigrationModel};
use crate::errors::{Error, Result};
use crate::services::ApplyOutcome;
use crate::types::{MigrationSortField, MigrationStatus, SortOrder};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMigrationRequest {
    #[validate(length(min = 1, message = "migration_name must not be empty"))]
    pub migration_name: String,

    #[validate(length(min = 1, message = "version must not be empty"))]
    pub version: String,

    pub description: Option<String>,

    #[validate(length(min = 1, message = "forward_sql must not be empty"))]
    pub forward_sql: String,

    #[validate(length(min = 1, message = "rollback_sql is mandatory"))]
    pub rollback_sql: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TargetEnvironment {
    #[validate(length(min = 1, message = "environment must not be empty"))]
    pub environment: String,
}

#[derive(Debug, Deserialize)]
pub struct MigrationListQuery {
    pub status: Option<String>,
    pub version: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub environment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PageEnvelope<T> {
    pub data: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

pub async fn create(
    State(state): State<SharedState>,
    Json(payload): Json<CreateMigrationRequest>,
) -> Result<(StatusCode, Json<MigrationModel>)> {
    payload.validate()?;

    let migration = state
        .services
        .migration_service
        .create(
            &payload.migration_name,
            &payload.version,
            payload.description.as_deref(),
            &payload.forward_sql,
            &payload.rollback_sql,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(migration)))
}

pub async fn list(
    State(state): State<SharedState>,
    Query(query): Query<MigrationListQuery>,
) -> Result<Json<PageEnvelope<MigrationModel>>> {
    let status = query
        .status
        .as_deref()
        .map(|s| {
            MigrationStatus::from_str(s)
                .map_err(|_| Error::Validation(format!("unknown status '{}'", s)))
        })
        .transpose()?;
    let sort = query
        .sort
        .as_deref()
        .map(|s| {
            MigrationSortField::from_str(s)
                .map_err(|_| Error::Validation(format!("unknown sort field '{}'", s)))
        })
        .transpose()?
        .unwrap_or_default();
    let order = query
        .order
        .as_deref()
        .map(|s| {
            SortOrder::from_str(s)
                .map_err(|_| Error::Validation(format!("unknown sort order '{}'", s)))
        })
        .transpose()?
        .unwrap_or_default();

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(50).clamp(1, 500);

    let (data, total) = state
        .services
        .migration_service
        .list(status, query.version.as_deref(), sort, order, page, per_page)
        .await?;

    Ok(Json(PageEnvelope {
        data,
        page,
        per_page,
        total,
    }))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<MigrationModel>> {
    let migration = state.services.migration_service.get_by_name(&name).await?;
    Ok(Json(migration))
}

pub async fn apply(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Json(payload): Json<TargetEnvironment>,
) -> Result<Json<ApplyOutcome>> {
    payload.validate()?;

    let outcome = state
        .services
        .migration_service
        .apply(&name, &payload.environment)
        .await?;

    Ok(Json(outcome))
}

pub async fn rollback(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Json(payload): Json<TargetEnvironment>,
) -> Result<Json<MigrationModel>> {
    payload.validate()?;

    let migration = state
        .services
        .migration_service
        .rollback(&name, &payload.environment)
        .await?;

    Ok(Json(migration))
}

pub async fn history(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryModel>>> {
    let rows = state
        .services
        .migration_service
        .history(&name, query.environment.as_deref())
        .await?;

    Ok(Json(rows))
}
