use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

use super::m20261019_000001_create_tables::Tables;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerOrders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomerOrders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CustomerOrders::TableId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerOrders::TotalAmount)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    // pending | completed
                    .col(
                        ColumnDef::new(CustomerOrders::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(CustomerOrders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_orders_table_id")
                            .from(CustomerOrders::Table, CustomerOrders::TableId)
                            .to(Tables::Table, Tables::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // Completed-order history lookups by table
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_orders_table_status")
                    .table(CustomerOrders::Table)
                    .col(CustomerOrders::TableId)
                    .col(CustomerOrders::Status)
                    .to_owned(),
            )
            .await?;

        // At most one pending order per table, enforced by the store
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_customer_orders_one_pending_per_table \
                 ON customer_orders (table_id) WHERE status = 'pending'",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerOrders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CustomerOrders {
    Table,
    Id,
    TableId,
    TotalAmount,
    Status,
    CreatedAt,
}
