use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Employees::EmployeeName)
                            .string_len(150)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Employees::Email).string_len(150).not_null())
                    .col(
                        ColumnDef::new(Employees::PhoneNumber)
                            .string_len(30)
                            .not_null(),
                    )
                    // owner | admin | employee
                    .col(ColumnDef::new(Employees::Role).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Employees::Username)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employees::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_role")
                    .table(Employees::Table)
                    .col(Employees::Role)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Employees {
    Table,
    Id,
    EmployeeName,
    Email,
    PhoneNumber,
    Role,
    Username,
    PasswordHash,
    CreatedAt,
}
