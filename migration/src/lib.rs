pub use sea_orm_migration::prelude::*;

mod m20261019_000001_create_tables;
mod m20261019_000002_create_menu_items;
mod m20261019_000003_create_employees;
mod m20261019_000004_create_employee_tasks;
mod m20261019_000005_create_customer_orders;
mod m20261019_000006_create_order_details;
mod m20261019_000007_create_business;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_create_tables::Migration),
            Box::new(m20261019_000002_create_menu_items::Migration),
            Box::new(m20261019_000003_create_employees::Migration),
            Box::new(m20261019_000004_create_employee_tasks::Migration),
            Box::new(m20261019_000005_create_customer_orders::Migration),
            Box::new(m20261019_000006_create_order_details::Migration),
            Box::new(m20261019_000007_create_business::Migration),
        ]
    }
}
