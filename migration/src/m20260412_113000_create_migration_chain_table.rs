use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SchemaMigrationChain::Table)
                    .if_not_exists()
                    .col(pk_auto(SchemaMigrationChain::Id))
                    .col(string(SchemaMigrationChain::Environment).not_null())
                    .col(integer(SchemaMigrationChain::MigrationId).not_null())
                    .col(string_null(SchemaMigrationChain::PrevHash))
                    .col(string(SchemaMigrationChain::CurrentHash).not_null())
                    .col(integer(SchemaMigrationChain::ChainPosition).not_null())
                    .col(boolean(SchemaMigrationChain::IsGenesis).not_null())
                    .col(
                        timestamp(SchemaMigrationChain::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                SchemaMigrationChain::Table,
                                SchemaMigrationChain::MigrationId,
                            )
                            .to(SchemaMigrations::Table, SchemaMigrations::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A migration is applied to an environment at most once
        manager
            .create_index(
                Index::create()
                    .name("uq_migration_chain_env_migration")
                    .table(SchemaMigrationChain::Table)
                    .col(SchemaMigrationChain::Environment)
                    .col(SchemaMigrationChain::MigrationId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Backstop for concurrent appends racing on the same tail
        manager
            .create_index(
                Index::create()
                    .name("uq_migration_chain_env_position")
                    .table(SchemaMigrationChain::Table)
                    .col(SchemaMigrationChain::Environment)
                    .col(SchemaMigrationChain::ChainPosition)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uq_migration_chain_env_position")
                    .table(SchemaMigrationChain::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("uq_migration_chain_env_migration")
                    .table(SchemaMigrationChain::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SchemaMigrationChain::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SchemaMigrationChain {
    Table,
    Id,
    Environment,
    MigrationId,
    PrevHash,
    CurrentHash,
    ChainPosition,
    IsGenesis,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SchemaMigrations {
    Table,
    Id,
}
