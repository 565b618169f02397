use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;
use validator_derive::Validate;

use crate::api::state::SharedState;
use crate::errors::{Error, Result};
use crate::runner::EngineMode;

#[derive(Debug, Deserialize, Validate)]
pub struct EngineRequest {
    #[validate(length(min = 1, message = "operation must not be empty"))]
    pub operation: String,

    #[serde(default)]
    pub params: Map<String, Value>,
}

/// Passes one operation through to the sync engine binary in the mode named
/// by the path segment.
pub async fn invoke(
    State(state): State<SharedState>,
    Path(mode): Path<String>,
    Json(payload): Json<EngineRequest>,
) -> Result<Json<Value>> {
    let mode = EngineMode::from_str(&mode)
        .map_err(|_| Error::NotFound(format!("unknown engine mode '{}'", mode)))?;
    payload.validate()?;

    let mut request = Map::new();
    request.insert("operation".to_string(), Value::String(payload.operation));
    request.extend(payload.params);

    let reply = state
        .services
        .runner
        .run(mode, &Value::Object(request))
        .await?;

    Ok(Json(reply))
}
