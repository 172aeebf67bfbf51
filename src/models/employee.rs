use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::entities::employees::{self, EmployeeRole};

/// Body of `POST /employees` and `PUT /employees/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    pub employee_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    pub role: EmployeeRole,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: i32,
    pub employee_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: EmployeeRole,
    pub username: String,
    pub created_at: DateTime<FixedOffset>,
}

impl From<employees::Model> for EmployeeResponse {
    fn from(employee: employees::Model) -> Self {
        Self {
            id: employee.id,
            employee_name: employee.employee_name,
            email: employee.email,
            phone_number: employee.phone_number,
            role: employee.role,
            username: employee.username,
            created_at: employee.created_at,
        }
    }
}

/// The generated password is only ever returned here
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreateResponse {
    pub employee: EmployeeResponse,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetResponse {
    pub password: String,
}
