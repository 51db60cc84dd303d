use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Player::Table)
                    .if_not_exists()
                    .col(string(Player::PlayerId).primary_key())
                    .col(string(Player::Name))
                    .col(string_null(Player::CountryCode))
                    .col(string(Player::Role).default("Player"))
                    .col(blob_null(Player::Avatar))
                    .col(
                        timestamp(Player::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_player_name")
                    .table(Player::Table)
                    .col(Player::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Player::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Player {
    Table,
    PlayerId,
    Name,
    CountryCode,
    Role,
    Avatar,
    CreatedAt,
}
