pub mod chain_link;
pub mod environment;
pub mod migration_history;
pub mod schema_migration;

pub use chain_link::{
    ActiveModel as ChainLinkActiveModel, Column as ChainLinkColumn, Entity as ChainLinksEntity,
    Model as ChainLinkModel,
};
pub use environment::{
    ActiveModel as EnvironmentActiveModel, Column as EnvironmentColumn,
    Entity as EnvironmentsEntity, Model as EnvironmentModel,
};
pub use migration_history::{
    ActiveModel as HistoryActiveModel, Column as HistoryColumn, Entity as HistoryEntity,
    Model as HistoryModel,
};
pub use schema_migration::{
    ActiveModel as MigrationActiveModel, Column as MigrationColumn, Entity as MigrationsEntity,
    Model as MigrationModel,
};
