//! `SeaORM` Entity prelude

pub use super::business::Entity as Business;
pub use super::customer_orders::Entity as CustomerOrders;
pub use super::employee_tasks::Entity as EmployeeTasks;
pub use super::employees::Entity as Employees;
pub use super::menu_items::Entity as MenuItems;
pub use super::order_details::Entity as OrderDetails;
pub use super::tables::Entity as Tables;
