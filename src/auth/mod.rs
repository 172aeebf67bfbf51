//! Authentication and role-based authorization
//!
//! Role policies are applied by the HTTP layer; services never see a role.

pub mod extractor;
pub mod jwt;
pub mod password;

pub use extractor::Principal;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};

use crate::entities::employees::EmployeeRole;

/// Catalog, table, staff and business administration
pub const MANAGEMENT: &[EmployeeRole] = &[EmployeeRole::Owner, EmployeeRole::Admin];

/// Any authenticated staff member
pub const STAFF: &[EmployeeRole] = &[
    EmployeeRole::Owner,
    EmployeeRole::Admin,
    EmployeeRole::Employee,
];

/// Floor staff allowed to close orders from the dining room
pub const FLOOR: &[EmployeeRole] = &[EmployeeRole::Admin, EmployeeRole::Employee];
