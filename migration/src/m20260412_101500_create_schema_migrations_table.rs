use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SchemaMigrations::Table)
                    .if_not_exists()
                    .col(pk_auto(SchemaMigrations::Id))
                    .col(
                        string(SchemaMigrations::MigrationName)
                            .not_null()
                            .unique_key(),
                    )
                    .col(string(SchemaMigrations::Version).not_null())
                    .col(string_null(SchemaMigrations::Description))
                    .col(text(SchemaMigrations::ForwardSql).not_null())
                    .col(text(SchemaMigrations::RollbackSql).not_null())
                    .col(string(SchemaMigrations::Checksum).not_null())
                    .col(string_null(SchemaMigrations::PrevHash))
                    .col(integer(SchemaMigrations::ChainPosition).not_null())
                    .col(boolean(SchemaMigrations::IsGenesis).not_null())
                    .col(
                        string(SchemaMigrations::Status)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        timestamp(SchemaMigrations::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_null(SchemaMigrations::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Status is a common list filter
        manager
            .create_index(
                Index::create()
                    .name("idx_schema_migrations_status")
                    .table(SchemaMigrations::Table)
                    .col(SchemaMigrations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schema_migrations_chain_position")
                    .table(SchemaMigrations::Table)
                    .col(SchemaMigrations::ChainPosition)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_schema_migrations_chain_position")
                    .table(SchemaMigrations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_schema_migrations_status")
                    .table(SchemaMigrations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SchemaMigrations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SchemaMigrations {
    Table,
    Id,
    MigrationName,
    Version,
    Description,
    ForwardSql,
    RollbackSql,
    Checksum,
    PrevHash,
    ChainPosition,
    IsGenesis,
    Status,
    CreatedAt,
    UpdatedAt,
}
