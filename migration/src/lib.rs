pub use sea_orm_migration::prelude::*;

mod m20260412_101500_create_schema_migrations_table;
mod m20260412_113000_create_migration_chain_table;
mod m20260412_121500_create_migration_history_table;
mod m20260413_094500_create_environments_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260412_101500_create_schema_migrations_table::Migration),
            Box::new(m20260412_113000_create_migration_chain_table::Migration),
            Box::new(m20260412_121500_create_migration_history_table::Migration),
            Box::new(m20260413_094500_create_environments_table::Migration),
        ]
    }
}
