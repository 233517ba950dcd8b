//! Company model - the clinic tenant record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Specialty;

/// Company state codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    Active,
    Suspended,
}

impl CompanyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyStatus::Active => "active",
            CompanyStatus::Suspended => "suspended",
        }
    }
}

/// Company row as returned by the backend after insertion. The primary key
/// is generated server-side.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub business_type: Specialty,
    pub status: CompanyStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Company {
    pub fn is_active(&self) -> bool {
        self.status == CompanyStatus::Active
    }
}

/// Insert payload for a new company.
#[derive(Debug, Clone, Serialize)]
pub struct NewCompany {
    pub name: String,
    pub email: String,
    pub business_type: Specialty,
    pub status: CompanyStatus,
}

impl NewCompany {
    /// A company always starts out active.
    pub fn new(name: String, email: String, business_type: Specialty) -> Self {
        Self {
            name,
            email,
            business_type,
            status: CompanyStatus::Active,
        }
    }
}
