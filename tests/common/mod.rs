use chrono::Duration;
use gastrobar_backend::{
    auth::{JwtConfig, JwtService},
    entities::{employees::EmployeeRole, menu_items, tables},
    models::{employee::EmployeeRequest, menu_item::MenuItemRequest},
    services::{employees, menu_catalog, table_registry},
    AppState,
};
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

pub const TEST_JWT_SECRET: &str = "test-secret-test-secret-test-secret!";

/// Set up a migrated in-memory database
///
/// One pooled connection so every query sees the same in-memory store.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

#[allow(dead_code)]
pub fn test_jwt() -> JwtService {
    JwtService::new(&JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        expiration: Duration::hours(1),
    })
}

#[allow(dead_code)]
pub async fn test_state() -> AppState {
    AppState {
        db: setup_test_db().await.expect("Failed to set up test DB"),
        jwt: test_jwt(),
    }
}

#[allow(dead_code)]
pub async fn seed_table(db: &DatabaseConnection, name: &str) -> tables::Model {
    table_registry::create_table(db, name)
        .await
        .expect("Failed to seed table")
}

#[allow(dead_code)]
pub async fn seed_menu_item(
    db: &DatabaseConnection,
    name: &str,
    price: Decimal,
    stock: i32,
) -> menu_items::Model {
    menu_catalog::create_menu_item(
        db,
        MenuItemRequest {
            item_name: name.to_string(),
            category: "Test".to_string(),
            price,
            stock,
            description: format!("{name} for tests"),
        },
    )
    .await
    .expect("Failed to seed menu item")
}

/// Create an account and return a bearer header value for it
#[allow(dead_code)]
pub async fn seed_employee_token(state: &AppState, username: &str, role: EmployeeRole) -> String {
    let account = employees::create_employee(
        &state.db,
        EmployeeRequest {
            employee_name: username.to_string(),
            email: format!("{username}@example.com"),
            phone_number: String::new(),
            role,
            username: username.to_string(),
        },
    )
    .await
    .expect("Failed to seed employee");

    let token = state
        .jwt
        .issue_token(account.employee.id, role)
        .expect("Failed to issue token");
    format!("Bearer {token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        assert!(db.is_ok(), "Test database should migrate");
    }
}
