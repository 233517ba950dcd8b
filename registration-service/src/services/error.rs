use service_core::error::AppError;
use thiserror::Error;

use super::backend::BackendError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Account creation failed: {0}")]
    AuthCreationFailed(BackendError),

    #[error("Auth service returned no identity")]
    NoIdentityReturned,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Company creation failed: {0}")]
    CompanyCreationFailed(BackendError),

    #[error("User creation failed: {0}")]
    UserCreationFailed(BackendError),

    #[error("A registration for this email is already in progress")]
    RegistrationInFlight,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    /// Label used for the registration outcome counter.
    pub fn metric_label(&self) -> &'static str {
        match self {
            ServiceError::AuthCreationFailed(_) => "auth_failed",
            ServiceError::NoIdentityReturned => "no_identity",
            ServiceError::EmailAlreadyRegistered => "duplicate_email",
            ServiceError::CompanyCreationFailed(_) => "company_failed",
            ServiceError::UserCreationFailed(_) => "user_failed",
            ServiceError::RegistrationInFlight => "in_flight",
            ServiceError::ValidationError(_) => "invalid",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::EmailAlreadyRegistered => {
                AppError::Conflict(anyhow::anyhow!("Email already registered"))
            }
            ServiceError::RegistrationInFlight => AppError::Conflict(anyhow::anyhow!(
                "A registration for this email is already in progress"
            )),
            e @ (ServiceError::AuthCreationFailed(_)
            | ServiceError::NoIdentityReturned
            | ServiceError::CompanyCreationFailed(_)
            | ServiceError::UserCreationFailed(_)) => AppError::UpstreamError(e.to_string()),
            ServiceError::ValidationError(e) => AppError::BadRequest(anyhow::anyhow!(e)),
            ServiceError::Internal(e) => AppError::InternalError(e),
        }
    }
}
