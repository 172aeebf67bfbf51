use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    auth, business, employees, menu_items, order_details, orders, tables, tasks,
};
use crate::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/login", post(auth::login))
        // Menu
        .route(
            "/menu-items",
            get(menu_items::list_menu_items).post(menu_items::create_menu_item),
        )
        .route(
            "/menu-items/{id}",
            get(menu_items::get_menu_item)
                .put(menu_items::update_menu_item)
                .delete(menu_items::delete_menu_item),
        )
        // Tables
        .route("/tables", get(tables::list_tables).post(tables::create_table))
        .route("/tables/{id}", get(tables::get_table).put(tables::update_table))
        .route("/tables/{id}/orders/pending", get(tables::get_pending_order))
        // Staff
        .route(
            "/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route("/employees/role/employee", get(employees::list_floor_employees))
        .route(
            "/employees/{id}",
            get(employees::get_employee).put(employees::update_employee),
        )
        .route("/employees/{id}/password", put(employees::reset_password))
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/tasks/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/tasks/{id}/status", put(tasks::update_task_status))
        .route("/my-tasks", get(tasks::my_tasks))
        .route(
            "/business",
            get(business::get_business).put(business::update_business),
        )
        // Orders
        .route("/order-details", post(order_details::create_order_detail))
        .route(
            "/order-details/{id}",
            get(order_details::get_order_detail)
                .put(order_details::update_order_detail)
                .delete(order_details::delete_order_detail),
        )
        .route("/orders/{order_id}", get(orders::get_order))
        .route("/orders/{order_id}/details", get(orders::get_order_details))
        .route("/orders/{order_id}/complete", post(orders::complete_order))
        .route(
            "/orders/{order_id}/complete-by-employee",
            post(orders::complete_order_by_employee),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
