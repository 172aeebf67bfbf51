// src/lib.rs

use sea_orm::DatabaseConnection;

use auth::JwtService;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt: JwtService,
}

pub mod entities {
    pub mod prelude;
    pub mod business;
    pub mod customer_orders;
    pub mod employee_tasks;
    pub mod employees;
    pub mod menu_items;
    pub mod order_details;
    pub mod tables;
}

pub mod services {
    pub mod order_ledger;
    pub mod line_items;
    pub mod order_workflow;
    pub mod menu_catalog;
    pub mod table_registry;
    pub mod employees;
    pub mod login;
    pub mod tasks;
    pub mod business;
}

pub mod handlers {
    pub mod extract;
    pub mod auth;
    pub mod business;
    pub mod employees;
    pub mod menu_items;
    pub mod order_details;
    pub mod orders;
    pub mod tables;
    pub mod tasks;
}

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
