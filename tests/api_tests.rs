mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use gastrobar_backend::{
    config::BootstrapOwner, entities::employees::EmployeeRole, routes, services::employees,
    AppState,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::common::{seed_employee_token, test_state};

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

struct Harness {
    app: Router,
    owner: String,
    waiter: String,
}

async fn harness() -> Harness {
    let state: AppState = test_state().await;
    let owner = seed_employee_token(&state, "owner", EmployeeRole::Owner).await;
    let waiter = seed_employee_token(&state, "waiter", EmployeeRole::Employee).await;

    Harness {
        app: routes::app(state),
        owner,
        waiter,
    }
}

/// Table "T1" plus a burger with the given stock; returns (table_id, menu_item_id)
async fn seed_floor(h: &Harness, stock: i32) -> (i64, i64) {
    let (status, table) = send(
        &h.app,
        Method::POST,
        "/tables",
        Some(&h.owner),
        Some(json!({ "table_name": "T1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, item) = send(
        &h.app,
        Method::POST,
        "/menu-items",
        Some(&h.owner),
        Some(json!({
            "item_name": "Burger",
            "category": "Mains",
            "price": "12.50",
            "stock": stock,
            "description": "Beef burger"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    (table["id"].as_i64().unwrap(), item["id"].as_i64().unwrap())
}

#[tokio::test]
async fn test_login_issues_usable_token() {
    let state = test_state().await;
    employees::ensure_bootstrap_owner(
        &state.db,
        &BootstrapOwner {
            username: "boss".to_string(),
            password: "s3cret-pass".to_string(),
        },
    )
    .await
    .unwrap();
    let app = routes::app(state);

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "username": "boss", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid username or password");

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "username": "boss", "password": "s3cret-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = format!("Bearer {}", body["token"].as_str().unwrap());

    let (status, _) = send(&app, Method::GET, "/employees", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_auth_and_role_checks() {
    let h = harness().await;

    let (status, body) = send(&h.app, Method::GET, "/tables", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(&h.app, Method::GET, "/tables", Some("Bearer not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &h.app,
        Method::POST,
        "/tables",
        Some(&h.waiter),
        Some(json!({ "table_name": "T1" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Insufficient permissions");

    // Menu is public
    let (status, body) = send(&h.app, Method::GET, "/menu-items", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_order_lifecycle_over_http() {
    let h = harness().await;
    let (table_id, item_id) = seed_floor(&h, 5).await;

    let (status, line) = send(
        &h.app,
        Method::POST,
        "/order-details",
        Some(&h.waiter),
        Some(json!({ "table_id": table_id, "menu_item_id": item_id, "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(line["quantity"], 2);
    assert_eq!(line["menu_item"]["item_name"], "Burger");
    let order_id = line["order_id"].as_i64().unwrap();

    let (status, body) = send(
        &h.app,
        Method::POST,
        "/order-details",
        Some(&h.waiter),
        Some(json!({ "table_id": table_id, "menu_item_id": item_id, "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("pending customer order already exists"));

    let (status, body) = send(
        &h.app,
        Method::POST,
        "/order-details",
        Some(&h.waiter),
        Some(json!({ "table_id": table_id, "menu_item_id": item_id, "quantity": 10, "order_id": order_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("insufficient stock"));

    let (status, pending) = send(
        &h.app,
        Method::GET,
        &format!("/tables/{table_id}/orders/pending"),
        Some(&h.waiter),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending["id"], order_id);
    assert_eq!(pending["order_details"].as_array().unwrap().len(), 1);

    // Owners are not floor staff
    let uri = format!("/orders/{order_id}/complete-by-employee");
    let (status, _) = send(&h.app, Method::POST, &uri, Some(&h.owner), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, order) = send(&h.app, Method::POST, &uri, Some(&h.waiter), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "completed");

    let (status, body) = send(
        &h.app,
        Method::POST,
        &format!("/orders/{order_id}/complete"),
        Some(&h.owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "order is not in 'pending' state");

    let (status, _) = send(&h.app, Method::POST, "/orders/9999/complete", Some(&h.owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_line_item_update_and_delete_over_http() {
    let h = harness().await;
    let (table_id, item_id) = seed_floor(&h, 5).await;

    let (_, line) = send(
        &h.app,
        Method::POST,
        "/order-details",
        Some(&h.waiter),
        Some(json!({ "table_id": table_id, "menu_item_id": item_id, "quantity": 2 })),
    )
    .await;
    let detail_id = line["id"].as_i64().unwrap();
    let order_id = line["order_id"].as_i64().unwrap();

    let (status, updated) = send(
        &h.app,
        Method::PUT,
        &format!("/order-details/{detail_id}"),
        Some(&h.waiter),
        Some(json!({ "order_id": order_id, "menu_item_id": item_id, "quantity": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], 4);

    let (status, details) = send(
        &h.app,
        Method::GET,
        &format!("/orders/{order_id}/details"),
        Some(&h.waiter),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &h.app,
        Method::DELETE,
        &format!("/order-details/{detail_id}"),
        Some(&h.waiter),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = send(
        &h.app,
        Method::GET,
        &format!("/order-details/{detail_id}"),
        Some(&h.waiter),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let h = harness().await;

    let (status, body) = send(
        &h.app,
        Method::POST,
        "/order-details",
        Some(&h.waiter),
        Some(json!({ "table_id": 1, "menu_item_id": 1, "quantity": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "quantity must be greater than 0");

    let (status, body) = send(
        &h.app,
        Method::POST,
        "/order-details",
        Some(&h.waiter),
        Some(json!({ "table_id": "one" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&h.app, Method::GET, "/orders/abc", Some(&h.waiter), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_staff_management_over_http() {
    let h = harness().await;

    let (status, created) = send(
        &h.app,
        Method::POST,
        "/employees",
        Some(&h.owner),
        Some(json!({
            "employee_name": "Luis",
            "email": "luis@example.com",
            "role": "employee",
            "username": "luis"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["password"].as_str().unwrap().len(), 12);
    assert!(created["employee"].get("password_hash").is_none());
    let luis = created["employee"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &h.app,
        Method::POST,
        "/employees",
        Some(&h.owner),
        Some(json!({ "employee_name": "Other", "role": "employee", "username": "luis" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "username already exists");

    let (status, floor) = send(&h.app, Method::GET, "/employees/role/employee", Some(&h.owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(floor.as_array().unwrap().len(), 2);

    let (status, task) = send(
        &h.app,
        Method::POST,
        "/tasks",
        Some(&h.owner),
        Some(json!({ "employee_id": luis, "task_description": "Polish glasses" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["status"], "pending");
    let task_id = task["id"].as_i64().unwrap();

    let (status, done) = send(
        &h.app,
        Method::PUT,
        &format!("/tasks/{task_id}/status"),
        Some(&h.owner),
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(done["completed_at"].is_string());

    let (status, mine) = send(&h.app, Method::GET, "/my-tasks", Some(&h.waiter), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(mine.as_array().unwrap().is_empty());

    let (status, _) = send(&h.app, Method::GET, "/business", Some(&h.owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, business) = send(
        &h.app,
        Method::PUT,
        "/business",
        Some(&h.owner),
        Some(json!({ "business_name": "Gastrobar" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(business["business_name"], "Gastrobar");
}
