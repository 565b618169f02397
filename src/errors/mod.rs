use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Domain errors surfaced to HTTP callers. Repository-level failures travel
/// as `anyhow` and collapse into `Database`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("invalid {engine} connection string: {reason}")]
    InvalidConnectionString { engine: String, reason: String },

    #[error(
        "chain integrity violation for environment '{environment}' at position {position}: \
         migration expects prev_hash {expected:?} but the chain tail is {found:?}"
    )]
    ChainIntegrity {
        environment: String,
        position: i32,
        expected: Option<String>,
        found: Option<String>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("engine '{0}' has no embedded driver; execution is owned by the sync engine binary")]
    UnsupportedEngine(String),

    #[error("sync engine failed: {0}")]
    Upstream(String),

    #[error("sync engine timed out after {}s", .0.as_secs())]
    UpstreamTimeout(Duration),

    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

impl Error {
    /// Stable machine-readable code carried in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation_error",
            Error::InvalidConnectionString { .. } => "invalid_connection_string",
            Error::ChainIntegrity { .. } => "chain_integrity_error",
            Error::NotFound(_) => "not_found",
            Error::Conflict(_) => "conflict",
            Error::UnsupportedEngine(_) => "unsupported_engine",
            Error::Upstream(_) => "upstream_error",
            Error::UpstreamTimeout(_) => "upstream_timeout",
            Error::Database(_) => "database_error",
        }
    }
}

impl From<sea_orm::DbErr> for Error {
    fn from(err: sea_orm::DbErr) -> Self {
        Error::Database(err.into())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        Error::Validation(errors.to_string())
    }
}
