mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use tower::ServiceExt;
use weir::api::{AppState, routes::build_router};
use weir::db;
use weir::services::AppServices;

use crate::common::sqlite_settings;

async fn test_state(production: bool) -> Result<(NamedTempFile, Arc<AppState>)> {
    let file = NamedTempFile::new()?;
    let mut settings = sqlite_settings(&file);
    if production {
        settings.server.environment = "production".to_string();
    }

    let services = AppServices::new(&settings).await?;
    db::migrations::up(&services.db).await?;

    let state = Arc::new(AppState::new(settings, services));
    state.mark_ready();
    Ok((file, state))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_answers_while_api_is_gated() -> Result<()> {
    let file = NamedTempFile::new()?;
    let settings = sqlite_settings(&file);
    let services = AppServices::new(&settings).await?;
    // No migrations, no mark_ready: the store is still initializing
    let state = Arc::new(AppState::new(settings, services));
    let app = build_router(state.clone());

    let response = app.clone().oneshot(get("/health")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ready"], false);
    assert_eq!(body["status"], "starting");

    let response = app.clone().oneshot(get("/api/migrations")).await?;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["error"], "not_ready");

    // Once ready, the same router serves the API
    db::migrations::up(&state.services.db).await?;
    state.mark_ready();

    let response = app.clone().oneshot(get("/api/migrations")).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/health")).await?;
    let body = body_json(response).await;
    assert_eq!(body["ready"], true);
    assert_eq!(body["status"], "ok");

    Ok(())
}

#[tokio::test]
async fn test_migration_lifecycle_over_http() -> Result<()> {
    let (_file, state) = test_state(false).await?;
    let app = build_router(state);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/environments",
            json!({ "name": "production", "engine": "postgres" }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/migrations",
            json!({
                "migration_name": "add_users_email_idx",
                "version": "1.0.0",
                "forward_sql": "CREATE TABLE users_email (id INTEGER PRIMARY KEY)",
                "rollback_sql": "DROP TABLE users_email",
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["is_genesis"], true);
    assert_eq!(created["chain_position"], 0);
    assert_eq!(created["status"], "PENDING");

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/migrations/add_users_email_idx/apply",
            json!({ "environment": "production" }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let outcome = body_json(response).await;
    assert_eq!(outcome["migration"]["status"], "APPLIED");
    assert_eq!(outcome["link"]["prev_hash"], Value::Null);

    // Double apply conflicts
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/migrations/add_users_email_idx/apply",
            json!({ "environment": "production" }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "conflict");

    let response = app
        .clone()
        .oneshot(get("/api/environments/production/chain/validate"))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    assert_eq!(report["valid"], true);
    assert_eq!(report["total_links"], 1);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/migrations/add_users_email_idx/rollback",
            json!({ "environment": "production" }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ROLLED_BACK");

    let response = app
        .clone()
        .oneshot(get(
            "/api/migrations/add_users_email_idx/history?environment=production",
        ))
        .await?;
    let history = body_json(response).await;
    assert_eq!(history.as_array().unwrap().len(), 2);

    let response = app.oneshot(get("/api/environments/production/chain")).await?;
    let links = body_json(response).await;
    assert_eq!(links.as_array().unwrap().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_empty_rollback_sql_is_a_validation_error() -> Result<()> {
    let (_file, state) = test_state(false).await?;
    let app = build_router(state);

    let response = app
        .oneshot(post_json(
            "/api/migrations",
            json!({
                "migration_name": "no_rollback",
                "version": "1.0.0",
                "forward_sql": "CREATE TABLE x (id INTEGER)",
                "rollback_sql": "",
            }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");

    Ok(())
}

#[tokio::test]
async fn test_unknown_migration_and_engine_mode_are_404() -> Result<()> {
    let (_file, state) = test_state(false).await?;
    let app = build_router(state);

    let response = app.clone().oneshot(get("/api/migrations/ghost")).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(post_json(
            "/api/engine/turbo",
            json!({ "operation": "noop" }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_unknown_engine_kind_is_rejected() -> Result<()> {
    let (_file, state) = test_state(false).await?;
    let app = build_router(state);

    let response = app
        .oneshot(post_json(
            "/api/environments",
            json!({ "name": "legacy", "engine": "dbase" }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");

    Ok(())
}

#[tokio::test]
async fn test_production_collapses_server_error_bodies() -> Result<()> {
    let (_file, state) = test_state(true).await?;
    let app = build_router(state);

    app.clone()
        .oneshot(post_json(
            "/api/environments",
            json!({ "name": "production", "engine": "postgres" }),
        ))
        .await?;
    app.clone()
        .oneshot(post_json(
            "/api/migrations",
            json!({
                "migration_name": "broken",
                "version": "1.0.0",
                "forward_sql": "CREATE GARBAGE",
                "rollback_sql": "DROP GARBAGE",
            }),
        ))
        .await?;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/migrations/broken/apply",
            json!({ "environment": "production" }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "internal_error");
    assert_eq!(body["message"], "Internal server error");

    // 4xx detail still passes through in production
    let response = app
        .oneshot(post_json(
            "/api/migrations/broken/apply",
            json!({ "environment": "nowhere" }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "not_found");

    Ok(())
}
