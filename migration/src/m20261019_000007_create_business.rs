use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Single-row business profile
        manager
            .create_table(
                Table::create()
                    .table(Business::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Business::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Business::BusinessName)
                            .string_len(150)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Business::Address).string().not_null())
                    .col(ColumnDef::new(Business::PhoneNumber).string_len(30).not_null())
                    .col(ColumnDef::new(Business::Email).string_len(150).not_null())
                    .col(ColumnDef::new(Business::CorporateReason).string().not_null())
                    .col(
                        ColumnDef::new(Business::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Business::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Business::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Business {
    Table,
    Id,
    BusinessName,
    Address,
    PhoneNumber,
    Email,
    CorporateReason,
    CreatedAt,
    UpdatedAt,
}
