use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use validator::Validate;
use validator_derive::Validate;

use crate::api::state::SharedState;
use crate::entities::EnvironmentModel;
use crate::errors::{Error, Result};
use crate::types::EngineKind;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEnvironmentRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "engine must not be empty"))]
    pub engine: String,

    pub connection_string: Option<String>,

    pub description: Option<String>,
}

pub async fn create(
    State(state): State<SharedState>,
    Json(payload): Json<CreateEnvironmentRequest>,
) -> Result<(StatusCode, Json<EnvironmentModel>)> {
    payload.validate()?;

    let engine = EngineKind::from_str(&payload.engine)
        .map_err(|_| Error::Validation(format!("unknown engine '{}'", payload.engine)))?;

    let environment = state
        .services
        .environment_service
        .create(
            &payload.name,
            engine,
            payload.connection_string.as_deref(),
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(environment)))
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<EnvironmentModel>>> {
    let environments = state.services.environment_service.get_all().await?;
    Ok(Json(environments))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<EnvironmentModel>> {
    let environment = state
        .services
        .environment_service
        .get_by_name(&name)
        .await?;
    Ok(Json(environment))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<StatusCode> {
    state
        .services
        .environment_service
        .delete_by_name(&name)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn ping(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<Value>> {
    state.services.environment_service.ping(&name).await?;
    Ok(Json(json!({ "status": "ok", "environment": name })))
}
