//! User model - company-scoped accounts.
//!
//! The user id is the auth identity id: foreign key as primary key, so an
//! identity maps to at most one user row.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User role codes within a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Staff,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Staff => "staff",
        }
    }
}

/// Insert payload for a new user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company_id: Uuid,
    pub role: UserRole,
    pub active: bool,
}

impl NewUser {
    /// The registering user is always the company admin and starts active.
    pub fn admin(id: Uuid, name: String, email: String, company_id: Uuid) -> Self {
        Self {
            id,
            name,
            email,
            company_id,
            role: UserRole::Admin,
            active: true,
        }
    }
}
