pub mod chain_repo;
pub mod environment_repo;
pub mod history_repo;
pub mod migration_repo;

pub use chain_repo::ChainRepository;
pub use environment_repo::EnvironmentRepository;
pub use history_repo::HistoryRepository;
pub use migration_repo::MigrationRepository;
