use dashmap::DashMap;
use std::sync::Arc;

use crate::{
    dtos::registration::{RegisterRequest, RegisterResponse},
    models::{NewCompany, NewUser},
    services::{
        ServiceError,
        backend::{BackendClient, BackendError},
        metrics,
    },
};

/// Orchestrates account creation for a new clinic tenant and its first
/// administrator: auth identity, then company row, then user row, strictly
/// in that order (the user row references both earlier records).
///
/// The three writes are independent network calls with no compensating
/// transaction. A failure after step 1 or step 2 leaves an orphaned identity
/// or company behind; those are logged at WARN so operators can reconcile
/// them.
#[derive(Clone)]
pub struct RegistrationService {
    backend: Arc<dyn BackendClient>,
    in_flight: Arc<DashMap<String, ()>>,
}

/// Releases the per-email submission slot on every exit path.
struct InFlightGuard<'a> {
    key: String,
    map: &'a DashMap<String, ()>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.map.remove(&self.key);
    }
}

impl RegistrationService {
    pub fn new(backend: Arc<dyn BackendClient>) -> Self {
        Self {
            backend,
            in_flight: Arc::new(DashMap::new()),
        }
    }

    /// Claim the submission slot for this email, or reject if a registration
    /// for it is already running.
    fn acquire(&self, email: &str) -> Result<InFlightGuard<'_>, ServiceError> {
        let key = email.trim().to_lowercase();
        match self.in_flight.entry(key.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(ServiceError::RegistrationInFlight),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(());
                Ok(InFlightGuard {
                    key,
                    map: &self.in_flight,
                })
            }
        }
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<RegisterResponse, ServiceError> {
        let result = self.run(req).await;
        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.metric_label(),
        };
        metrics::record_registration(outcome);
        result
    }

    async fn run(&self, req: RegisterRequest) -> Result<RegisterResponse, ServiceError> {
        let _guard = self.acquire(&req.email)?;

        // 1. Create the auth identity. Nothing exists yet, so a failure here
        // leaves no partial state.
        let identity = self
            .backend
            .sign_up(&req.email, &req.password)
            .await
            .map_err(|e| match e {
                BackendError::DuplicateEmail => ServiceError::EmailAlreadyRegistered,
                BackendError::NoIdentity => ServiceError::NoIdentityReturned,
                e => ServiceError::AuthCreationFailed(e),
            })?;

        // 2. Create the company record. The identity from step 1 is not
        // cleaned up on failure; flag the orphan instead.
        let company = NewCompany::new(req.company_name, req.email.clone(), req.business_type);
        let company = self.backend.insert_company(&company).await.map_err(|e| {
            tracing::warn!(
                identity_id = %identity.id,
                email = %req.email,
                "Company creation failed; auth identity is orphaned"
            );
            ServiceError::CompanyCreationFailed(e)
        })?;

        // 3. Create the user record, keyed by the auth identity id.
        let user = NewUser::admin(identity.id, req.name, req.email.clone(), company.id);
        self.backend.insert_user(&user).await.map_err(|e| {
            tracing::warn!(
                identity_id = %identity.id,
                company_id = %company.id,
                email = %req.email,
                "User creation failed; auth identity and company are orphaned"
            );
            ServiceError::UserCreationFailed(e)
        })?;

        tracing::info!(
            user_id = %identity.id,
            company_id = %company.id,
            "Clinic registered"
        );

        Ok(RegisterResponse {
            user_id: identity.id,
            company_id: company.id,
            message: "Registration successful. Please sign in to continue.".to_string(),
        })
    }
}
