pub mod database;
pub mod engine;
pub mod log;
pub mod server;
pub mod settings;

pub use database::DatabaseConfig;
pub use engine::EngineConfig;
pub use log::LogConfig;
pub use server::ServerConfig;
pub use settings::Settings;
