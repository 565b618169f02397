use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::api::state::SharedState;

/// Liveness plus readiness in one place; the only route that answers
/// before metadata migrations finish.
pub async fn health(State(state): State<SharedState>) -> Json<Value> {
    let ready = state.is_ready();
    Json(json!({
        "status": if ready { "ok" } else { "starting" },
        "ready": ready,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
