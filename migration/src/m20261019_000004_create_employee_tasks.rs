use sea_orm_migration::prelude::*;

use super::m20261019_000003_create_employees::Employees;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmployeeTasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployeeTasks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EmployeeTasks::EmployeeId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeeTasks::TaskDescription)
                            .text()
                            .not_null(),
                    )
                    // pending | in_progress | completed
                    .col(
                        ColumnDef::new(EmployeeTasks::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(EmployeeTasks::AssignedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeeTasks::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EmployeeTasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_tasks_employee_id")
                            .from(EmployeeTasks::Table, EmployeeTasks::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employee_tasks_employee_id")
                    .table(EmployeeTasks::Table)
                    .col(EmployeeTasks::EmployeeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmployeeTasks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EmployeeTasks {
    Table,
    Id,
    EmployeeId,
    TaskDescription,
    Status,
    AssignedAt,
    CompletedAt,
    CreatedAt,
}
