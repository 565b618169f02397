use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::state::SharedState;
use crate::errors::Error;

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_)
            | Error::InvalidConnectionString { .. }
            | Error::ChainIntegrity { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::UnsupportedEngine(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Upstream(_) => StatusCode::BAD_GATEWAY,
            Error::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "error": self.code(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

/// Collapses 5xx bodies to a generic message in production so driver
/// details never leak to callers. 4xx bodies always pass through.
pub async fn sanitize_errors(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;

    if state.settings.server.is_production() && response.status().is_server_error() {
        let status = response.status();
        return (
            status,
            Json(json!({
                "error": "internal_error",
                "message": "Internal server error",
            })),
        )
            .into_response();
    }

    response
}

/// Everything except /health returns 503 until the metadata store has been
/// migrated.
pub async fn require_ready(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Response {
    if !state.is_ready() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "error": "not_ready",
                "message": "metadata store is still initializing",
            })),
        )
            .into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            Error::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::ChainIntegrity {
                environment: "production".into(),
                position: 3,
                expected: None,
                found: Some("abc".into()),
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(Error::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            Error::UnsupportedEngine("mssql".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            Error::Upstream("boom".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            Error::UpstreamTimeout(std::time::Duration::from_secs(30)).status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            Error::Database(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
