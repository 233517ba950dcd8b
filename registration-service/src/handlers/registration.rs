use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    dtos::{
        ErrorResponse,
        registration::{RegisterRequest, RegisterResponse},
    },
    services::ServiceError,
    utils::ValidatedJson,
};

/// Register a new clinic and its first administrator
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Clinic registered successfully", body = RegisterResponse),
        (status = 409, description = "Email already registered, or a submission for it is in flight", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "The backend rejected a step of the registration", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Registration"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, Response> {
    let res = state.registration.register(req).await.map_err(|e| {
        let status = match &e {
            ServiceError::EmailAlreadyRegistered | ServiceError::RegistrationInFlight => {
                StatusCode::CONFLICT
            }
            ServiceError::AuthCreationFailed(_)
            | ServiceError::NoIdentityReturned
            | ServiceError::CompanyCreationFailed(_)
            | ServiceError::UserCreationFailed(_) => StatusCode::BAD_GATEWAY,
            ServiceError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response()
    })?;

    Ok((StatusCode::CREATED, Json(res)))
}
