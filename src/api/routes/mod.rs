pub mod chain;
pub mod engine;
pub mod environments;
pub mod health;
pub mod migrations;

use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::error::{require_ready, sanitize_errors};
use crate::api::state::SharedState;
use crate::config::ServerConfig;

pub fn build_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.settings.server);

    let api = Router::new()
        .route(
            "/migrations",
            get(migrations::list).post(migrations::create),
        )
        .route("/migrations/{name}", get(migrations::get))
        .route("/migrations/{name}/apply", post(migrations::apply))
        .route("/migrations/{name}/rollback", post(migrations::rollback))
        .route("/migrations/{name}/history", get(migrations::history))
        .route(
            "/environments",
            get(environments::list).post(environments::create),
        )
        .route(
            "/environments/{name}",
            get(environments::get).delete(environments::delete),
        )
        .route("/environments/{name}/ping", post(environments::ping))
        .route("/environments/{name}/chain", get(chain::links))
        .route("/environments/{name}/chain/validate", get(chain::validate))
        .route("/engine/{mode}", post(engine::invoke))
        .layer(middleware::from_fn_with_state(state.clone(), require_ready));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            sanitize_errors,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    match server.allowed_origins.as_deref().map(str::trim) {
        None | Some("*") | Some("") => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        Some(list) => {
            let origins: Vec<HeaderValue> = list
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}
