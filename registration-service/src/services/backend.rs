//! Backend-as-a-service client: hosted auth plus a PostgREST-style interface
//! over the companies and users tables.

use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use service_core::async_trait::async_trait;
use service_core::error::AppError;
use std::time::Duration;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use crate::models::{AuthIdentity, Company, NewCompany, NewUser};

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("email already registered")]
    DuplicateEmail,

    #[error("sign-up succeeded but no identity was returned")]
    NoIdentity,

    #[error("backend returned an empty result set")]
    EmptyResult,

    #[error("backend request timed out")]
    Timeout,

    #[error("backend unreachable: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else {
            BackendError::Transport(err)
        }
    }
}

/// Seam to the external backend. The workflow only ever performs these three
/// writes, strictly in this order.
#[async_trait]
pub trait BackendClient: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthIdentity, BackendError>;

    async fn insert_company(&self, company: &NewCompany) -> Result<Company, BackendError>;

    async fn insert_user(&self, user: &NewUser) -> Result<(), BackendError>;
}

/// Supabase-style client over the hosted auth (`/auth/v1`) and REST
/// (`/rest/v1`) endpoints. Every request carries the project API key and is
/// bounded by the configured timeout.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseClient {
    pub fn new(config: &crate::config::BackendConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn auth_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
    }
}

/// Error payload shape varies between the auth and REST endpoints, and the
/// auth endpoint may send several of these fields in one payload.
#[derive(Deserialize)]
struct ApiErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl ApiErrorBody {
    /// Most descriptive field first; `error` is usually a bare code.
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
    }
}

async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ApiErrorBody>().await {
        Ok(body) => body
            .into_message()
            .unwrap_or_else(|| format!("backend returned {}", status)),
        Err(_) => format!("backend returned {}", status),
    }
}

#[derive(Deserialize)]
struct SignUpResponse {
    id: Option<Uuid>,
    email: Option<String>,
    user: Option<AuthIdentity>,
}

#[async_trait]
impl BackendClient for SupabaseClient {
    #[instrument(skip(self, password), fields(email = %email))]
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthIdentity, BackendError> {
        let response = self
            .auth_headers(self.http.post(format!("{}/auth/v1/signup", self.base_url)))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            let lowered = message.to_lowercase();
            if lowered.contains("already registered") || lowered.contains("already exists") {
                return Err(BackendError::DuplicateEmail);
            }
            return Err(BackendError::Rejected { status, message });
        }

        // Depending on auto-confirm settings the identity arrives either at
        // the top level or nested under "user".
        let body: SignUpResponse = response.json().await?;
        if let Some(user) = body.user {
            return Ok(user);
        }
        match body.id {
            Some(id) => Ok(AuthIdentity {
                id,
                email: body.email.unwrap_or_else(|| email.to_string()),
            }),
            None => Err(BackendError::NoIdentity),
        }
    }

    #[instrument(skip(self, company), fields(name = %company.name))]
    async fn insert_company(&self, company: &NewCompany) -> Result<Company, BackendError> {
        let response = self
            .auth_headers(self.http.post(format!("{}/rest/v1/companies", self.base_url)))
            .header("Prefer", "return=representation")
            .json(&[company])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(BackendError::Rejected { status, message });
        }

        let rows: Vec<Company> = response.json().await?;
        rows.into_iter().next().ok_or(BackendError::EmptyResult)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id, company_id = %user.company_id))]
    async fn insert_user(&self, user: &NewUser) -> Result<(), BackendError> {
        let response = self
            .auth_headers(self.http.post(format!("{}/rest/v1/users", self.base_url)))
            .header("Prefer", "return=minimal")
            .json(&[user])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(BackendError::Rejected { status, message });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_with_coexisting_fields_keeps_the_description() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"error":"invalid_request","error_description":"Email already registered"}"#,
        )
        .unwrap();
        assert_eq!(body.into_message().unwrap(), "Email already registered");
    }

    #[test]
    fn error_body_reads_each_known_field() {
        for payload in [
            r#"{"msg":"bad input"}"#,
            r#"{"message":"bad input"}"#,
            r#"{"error_description":"bad input"}"#,
            r#"{"error":"bad input"}"#,
        ] {
            let body: ApiErrorBody = serde_json::from_str(payload).unwrap();
            assert_eq!(body.into_message().unwrap(), "bad input");
        }
    }

    #[test]
    fn error_body_without_a_known_field_yields_nothing() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"code":422}"#).unwrap();
        assert!(body.into_message().is_none());
    }
}
