pub mod auth;
pub mod business;
pub mod common;
pub mod employee;
pub mod menu_item;
pub mod order;
pub mod table;
pub mod task;
