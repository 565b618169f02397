use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Environments::Table)
                    .if_not_exists()
                    .col(pk_auto(Environments::Id))
                    .col(string(Environments::Name).not_null().unique_key())
                    .col(string(Environments::Engine).not_null())
                    .col(string_null(Environments::ConnectionString))
                    .col(string_null(Environments::Description))
                    .col(
                        timestamp(Environments::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Environments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Environments {
    Table,
    Id,
    Name,
    Engine,
    ConnectionString,
    Description,
    CreatedAt,
}
