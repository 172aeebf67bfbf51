//! Employee accounts
//!
//! Passwords are generated server-side and returned once; only the argon2
//! hash is stored.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::auth::password::{generate_password, hash_password};
use crate::config::BootstrapOwner;
use crate::entities::employees::{self, EmployeeRole};
use crate::entities::prelude::*;
use crate::error::{AppError, AppResult, DbResultExt};
use crate::models::employee::EmployeeRequest;

/// A freshly created account and its plaintext password
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub employee: employees::Model,
    pub password: String,
}

fn validate(request: &EmployeeRequest) -> AppResult<()> {
    if request.employee_name.trim().is_empty() {
        return Err(AppError::validation("employee name cannot be empty"));
    }
    if request.username.trim().is_empty() {
        return Err(AppError::validation("username cannot be empty"));
    }
    Ok(())
}

pub async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> AppResult<Option<employees::Model>> {
    Employees::find()
        .filter(employees::Column::Username.eq(username))
        .one(db)
        .await
        .context("failed to find employee by username")
}

pub async fn get_employee(db: &DatabaseConnection, employee_id: i32) -> AppResult<employees::Model> {
    Employees::find_by_id(employee_id)
        .one(db)
        .await
        .context("failed to find employee")?
        .ok_or_else(|| AppError::not_found("employee not found"))
}

pub async fn list_employees(db: &DatabaseConnection) -> AppResult<Vec<employees::Model>> {
    Employees::find()
        .order_by_asc(employees::Column::Id)
        .all(db)
        .await
        .context("failed to list employees")
}

pub async fn list_by_role(
    db: &DatabaseConnection,
    role: EmployeeRole,
) -> AppResult<Vec<employees::Model>> {
    Employees::find()
        .filter(employees::Column::Role.eq(role))
        .order_by_asc(employees::Column::Id)
        .all(db)
        .await
        .context("failed to list employees by role")
}

async fn insert_account(
    db: &DatabaseConnection,
    request: EmployeeRequest,
    password: String,
) -> AppResult<NewAccount> {
    if find_by_username(db, &request.username).await?.is_some() {
        return Err(AppError::Conflict("username already exists".to_string()));
    }

    let password_hash = hash_password(&password)?;

    let employee = employees::ActiveModel {
        employee_name: Set(request.employee_name),
        email: Set(request.email),
        phone_number: Set(request.phone_number),
        role: Set(request.role),
        username: Set(request.username),
        password_hash: Set(password_hash),
        created_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    }
    .insert(db)
    .await
    .context("failed to create employee")?;

    tracing::info!(employee_id = employee.id, role = ?employee.role, "Employee created");
    Ok(NewAccount { employee, password })
}

/// Create an account with a generated password
pub async fn create_employee(
    db: &DatabaseConnection,
    request: EmployeeRequest,
) -> AppResult<NewAccount> {
    validate(&request)?;
    insert_account(db, request, generate_password()).await
}

/// Update profile fields and role. The password is left untouched.
pub async fn update_employee(
    db: &DatabaseConnection,
    employee_id: i32,
    request: EmployeeRequest,
) -> AppResult<employees::Model> {
    validate(&request)?;

    let current = get_employee(db, employee_id).await?;

    if current.username != request.username
        && find_by_username(db, &request.username).await?.is_some()
    {
        return Err(AppError::Conflict("username already exists".to_string()));
    }

    let mut active: employees::ActiveModel = current.into();
    active.employee_name = Set(request.employee_name);
    active.email = Set(request.email);
    active.phone_number = Set(request.phone_number);
    active.role = Set(request.role);
    active.username = Set(request.username);

    active.update(db).await.context("failed to update employee")
}

/// Replace the password with a generated one and return it
pub async fn reset_password(db: &DatabaseConnection, employee_id: i32) -> AppResult<String> {
    let current = get_employee(db, employee_id).await?;

    let password = generate_password();
    let mut active: employees::ActiveModel = current.into();
    active.password_hash = Set(hash_password(&password)?);
    active
        .update(db)
        .await
        .context("failed to reset employee password")?;

    tracing::info!(employee_id, "Employee password reset");
    Ok(password)
}

/// Create the configured owner account when the store has no employees yet
pub async fn ensure_bootstrap_owner(
    db: &DatabaseConnection,
    owner: &BootstrapOwner,
) -> AppResult<Option<employees::Model>> {
    let count = Employees::find()
        .count(db)
        .await
        .context("failed to count employees")?;
    if count > 0 {
        return Ok(None);
    }

    let request = EmployeeRequest {
        employee_name: owner.username.clone(),
        email: String::new(),
        phone_number: String::new(),
        role: EmployeeRole::Owner,
        username: owner.username.clone(),
    };
    let account = insert_account(db, request, owner.password.clone()).await?;

    tracing::info!(username = %account.employee.username, "Bootstrap owner created");
    Ok(Some(account.employee))
}
