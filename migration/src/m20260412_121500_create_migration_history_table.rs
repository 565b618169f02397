use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SchemaMigrationHistory::Table)
                    .if_not_exists()
                    .col(pk_auto(SchemaMigrationHistory::Id))
                    .col(integer(SchemaMigrationHistory::MigrationId).not_null())
                    .col(string(SchemaMigrationHistory::Environment).not_null())
                    .col(string(SchemaMigrationHistory::Status).not_null())
                    .col(text_null(SchemaMigrationHistory::Error))
                    .col(timestamp(SchemaMigrationHistory::StartedAt).not_null())
                    .col(big_integer(SchemaMigrationHistory::DurationMs).not_null())
                    .col(
                        timestamp(SchemaMigrationHistory::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                SchemaMigrationHistory::Table,
                                SchemaMigrationHistory::MigrationId,
                            )
                            .to(SchemaMigrations::Table, SchemaMigrations::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_migration_history_migration_env")
                    .table(SchemaMigrationHistory::Table)
                    .col(SchemaMigrationHistory::MigrationId)
                    .col(SchemaMigrationHistory::Environment)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_migration_history_migration_env")
                    .table(SchemaMigrationHistory::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(SchemaMigrationHistory::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum SchemaMigrationHistory {
    Table,
    Id,
    MigrationId,
    Environment,
    Status,
    Error,
    StartedAt,
    DurationMs,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SchemaMigrations {
    Table,
    Id,
}
