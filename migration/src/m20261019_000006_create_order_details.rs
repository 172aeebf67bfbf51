use sea_orm_migration::prelude::*;

use super::m20261019_000002_create_menu_items::MenuItems;
use super::m20261019_000005_create_customer_orders::CustomerOrders;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderDetails::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderDetails::OrderId).integer().not_null())
                    .col(
                        ColumnDef::new(OrderDetails::MenuItemId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrderDetails::Quantity)
                            .integer()
                            .not_null()
                            .check(Expr::col(OrderDetails::Quantity).gt(0)),
                    )
                    .col(
                        ColumnDef::new(OrderDetails::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_details_order_id")
                            .from(OrderDetails::Table, OrderDetails::OrderId)
                            .to(CustomerOrders::Table, CustomerOrders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    // Menu items still referenced by a line item cannot be deleted
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_details_menu_item_id")
                            .from(OrderDetails::Table, OrderDetails::MenuItemId)
                            .to(MenuItems::Table, MenuItems::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_details_order_id")
                    .table(OrderDetails::Table)
                    .col(OrderDetails::OrderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderDetails::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum OrderDetails {
    Table,
    Id,
    OrderId,
    MenuItemId,
    Quantity,
    CreatedAt,
}
