use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::Settings;
use crate::services::AppServices;

/// Shared application state passed to every request handler. Constructed
/// once at startup; no process-wide globals.
pub struct AppState {
    pub settings: Settings,
    pub services: AppServices,
    ready: AtomicBool,
}

impl AppState {
    pub fn new(settings: Settings, services: AppServices) -> Self {
        Self {
            settings,
            services,
            ready: AtomicBool::new(false),
        }
    }

    /// Flipped exactly once, after metadata migrations complete.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

pub type SharedState = Arc<AppState>;
