use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::state::SharedState;
use crate::entities::ChainLinkModel;
use crate::errors::Result;
use crate::types::ChainReport;

pub async fn links(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<ChainLinkModel>>> {
    let links = state.services.migration_service.chain_links(&name).await?;
    Ok(Json(links))
}

pub async fn validate(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<ChainReport>> {
    let report = state
        .services
        .migration_service
        .validate_chain(&name)
        .await?;
    Ok(Json(report))
}
