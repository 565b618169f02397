use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::api::routes::build_router;
use crate::api::state::AppState;
use crate::config::Settings;
use crate::db;
use crate::services::AppServices;

/// Binds the control plane and serves until the process is stopped.
/// Metadata migrations run in the background after the listener is up;
/// everything except /health answers 503 until they finish.
pub async fn serve(settings: Settings) -> Result<()> {
    let services = AppServices::new(&settings).await?;
    let state = Arc::new(AppState::new(settings, services));

    let migrate_state = state.clone();
    tokio::spawn(async move {
        match db::migrations::up(&migrate_state.services.db).await {
            Ok(()) => {
                migrate_state.mark_ready();
                info!("Metadata store ready");
            }
            Err(e) => {
                error!(
                    "Metadata migrations failed, control plane stays unready: {}",
                    e
                );
            }
        }
    });

    let addr = format!(
        "{}:{}",
        state.settings.server.host, state.settings.server.port
    );
    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind {}", addr))?;
    info!("weir control plane listening on {}", addr);

    let app = build_router(state);
    axum::serve(listener, app).await.context("HTTP server error")?;

    Ok(())
}
