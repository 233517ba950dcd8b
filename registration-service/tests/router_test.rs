//! HTTP-level tests driving the full router, middleware stack included.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{MockBackend, test_state};
use http_body_util::BodyExt;
use registration_service::build_router;
use registration_service::dtos::registration::RegisterResponse;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::util::ServiceExt;

fn register_body(email: &str) -> Value {
    json!({
        "company_name": "Vida Clinic",
        "business_type": "Cardiology",
        "email": email,
        "password": "secret123",
        "name": "Ana"
    })
}

fn post_register(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn register_returns_created_with_ids_and_confirmation() {
    let app = build_router(test_state(Arc::new(MockBackend::default()))).await.unwrap();

    let response = app
        .oneshot(post_register(&register_body("ana@vidaclinic.com")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: RegisterResponse = serde_json::from_slice(&bytes).unwrap();
    assert!(body.message.contains("Registration successful"));
    assert_ne!(body.user_id, body.company_id);
}

#[tokio::test]
async fn register_rejects_a_malformed_email() {
    let app = build_router(test_state(Arc::new(MockBackend::default()))).await.unwrap();

    let mut body = register_body("not-an-email");
    body["email"] = json!("not-an-email");
    let response = app.oneshot(post_register(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn register_rejects_a_short_password() {
    let app = build_router(test_state(Arc::new(MockBackend::default()))).await.unwrap();

    let mut body = register_body("ana@vidaclinic.com");
    body["password"] = json!("short");
    let response = app.oneshot(post_register(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn register_rejects_a_blank_company_name() {
    let app = build_router(test_state(Arc::new(MockBackend::default()))).await.unwrap();

    let mut body = register_body("ana@vidaclinic.com");
    body["company_name"] = json!("");
    let response = app.oneshot(post_register(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn register_rejects_an_unknown_specialty() {
    let app = build_router(test_state(Arc::new(MockBackend::default()))).await.unwrap();

    let mut body = register_body("ana@vidaclinic.com");
    body["business_type"] = json!("Alchemy");
    let response = app.oneshot(post_register(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn registering_the_same_email_twice_returns_conflict() {
    let app = build_router(test_state(Arc::new(MockBackend::default()))).await.unwrap();

    let body = register_body("ana@vidaclinic.com");
    let first = app.clone().oneshot(post_register(&body)).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.oneshot(post_register(&body)).await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn backend_failure_returns_bad_gateway() {
    let backend = Arc::new(MockBackend {
        fail_insert_user: true,
        ..Default::default()
    });
    let app = build_router(test_state(backend)).await.unwrap();

    let response = app
        .oneshot(post_register(&register_body("ana@vidaclinic.com")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().unwrap().contains("User creation failed"));
}

#[tokio::test]
async fn backend_timeout_returns_bad_gateway() {
    let backend = Arc::new(MockBackend {
        time_out_sign_up: true,
        ..Default::default()
    });
    let app = build_router(test_state(backend)).await.unwrap();

    let response = app
        .oneshot(post_register(&register_body("ana@vidaclinic.com")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn health_check_reports_the_service() {
    let app = build_router(test_state(Arc::new(MockBackend::default()))).await.unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "registration-service");
}

#[tokio::test]
async fn responses_carry_a_request_id_and_security_headers() {
    let app = build_router(test_state(Arc::new(MockBackend::default()))).await.unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
}
