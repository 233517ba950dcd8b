//! Shared test fixtures: an in-memory backend that records the rows the
//! workflow writes and can inject a failure at each step.
#![allow(dead_code)]

use chrono::Utc;
use registration_service::AppState;
use registration_service::config::{
    BackendConfig, Environment, RateLimitConfig, RegistrationConfig, SecurityConfig, SwaggerConfig,
    SwaggerMode,
};
use registration_service::dtos::registration::RegisterRequest;
use registration_service::models::{AuthIdentity, Company, NewCompany, NewUser, Specialty};
use registration_service::services::{BackendClient, BackendError, RegistrationService};
use service_core::async_trait::async_trait;
use service_core::axum::http::StatusCode;
use service_core::middleware::rate_limit::create_ip_rate_limiter;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

#[derive(Default)]
pub struct MockBackend {
    pub identities: Mutex<Vec<AuthIdentity>>,
    pub companies: Mutex<Vec<Company>>,
    pub users: Mutex<Vec<NewUser>>,
    pub fail_sign_up: bool,
    pub time_out_sign_up: bool,
    pub fail_insert_company: bool,
    pub fail_insert_user: bool,
    pub omit_identity: bool,
    pub sign_up_delay: Option<Duration>,
}

fn rejected(message: &str) -> BackendError {
    BackendError::Rejected {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: message.to_string(),
    }
}

#[async_trait]
impl BackendClient for MockBackend {
    async fn sign_up(&self, email: &str, _password: &str) -> Result<AuthIdentity, BackendError> {
        if let Some(delay) = self.sign_up_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_sign_up {
            return Err(rejected("auth service rejected the request"));
        }
        if self.time_out_sign_up {
            return Err(BackendError::Timeout);
        }
        if self.omit_identity {
            return Err(BackendError::NoIdentity);
        }
        if self
            .identities
            .lock()
            .unwrap()
            .iter()
            .any(|i| i.email == email)
        {
            return Err(BackendError::DuplicateEmail);
        }

        let identity = AuthIdentity {
            id: Uuid::new_v4(),
            email: email.to_string(),
        };
        self.identities.lock().unwrap().push(identity.clone());
        Ok(identity)
    }

    async fn insert_company(&self, company: &NewCompany) -> Result<Company, BackendError> {
        if self.fail_insert_company {
            return Err(rejected("companies insert rejected"));
        }

        let row = Company {
            id: Uuid::new_v4(),
            name: company.name.clone(),
            email: company.email.clone(),
            business_type: company.business_type,
            status: company.status.clone(),
            created_at: Some(Utc::now()),
        };
        self.companies.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn insert_user(&self, user: &NewUser) -> Result<(), BackendError> {
        if self.fail_insert_user {
            return Err(rejected("users insert rejected"));
        }

        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }
}

pub fn register_request(email: &str) -> RegisterRequest {
    RegisterRequest {
        company_name: "Vida Clinic".to_string(),
        business_type: Specialty::Cardiology,
        email: email.to_string(),
        password: "secret123".to_string(),
        name: "Ana".to_string(),
    }
}

pub fn test_config() -> RegistrationConfig {
    RegistrationConfig {
        common: service_core::config::Config { port: 8080 },
        environment: Environment::Dev,
        service_name: "registration-service".to_string(),
        service_version: "test".to_string(),
        log_level: "info".to_string(),
        otlp_endpoint: "http://localhost:4317".to_string(),
        backend: BackendConfig {
            url: "http://localhost:54321".to_string(),
            api_key: "test-key".to_string(),
            timeout_seconds: 5,
        },
        security: SecurityConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        swagger: SwaggerConfig {
            enabled: SwaggerMode::Disabled,
        },
        rate_limit: RateLimitConfig {
            register_attempts: 100,
            register_window_seconds: 60,
            global_ip_limit: 1000,
            global_ip_window_seconds: 60,
        },
    }
}

pub fn test_state(backend: Arc<MockBackend>) -> AppState {
    let backend: Arc<dyn BackendClient> = backend;
    AppState {
        config: test_config(),
        backend: backend.clone(),
        registration: RegistrationService::new(backend),
        register_rate_limiter: create_ip_rate_limiter(100, 60),
        ip_rate_limiter: create_ip_rate_limiter(1000, 60),
    }
}
