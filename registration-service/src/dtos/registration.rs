use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Specialty;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Clinic name is required"))]
    #[schema(example = "Vida Clinic")]
    pub company_name: String,

    /// Must be one of the fixed specialty list; unknown values are rejected.
    #[schema(example = "Cardiology")]
    pub business_type: Specialty,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ana@vida.com")]
    pub email: String,

    // Six characters is the auth provider's own minimum.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret123", min_length = 6)]
    pub password: String,

    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ana")]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub user_id: Uuid,
    #[schema(example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    pub company_id: Uuid,
    #[schema(example = "Registration successful. Please sign in to continue.")]
    pub message: String,
}
